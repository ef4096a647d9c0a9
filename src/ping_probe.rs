use crate::details::icmp::{IcmpEcho, RawSocket, TSocket};
use crate::details::PingError;
use crate::{PingResult, ProbeOutcome, SessionConfig, Target};

/// A probing run against one target. Yields one outcome per probe, in sequence order,
/// and owns the raw socket until it is dropped.
pub struct ProbeSession(crate::details::ProbeSession<RawSocket>);

impl ProbeSession {
    /// Identifier carried by every echo request of this session.
    pub fn identifier(&self) -> u16 {
        self.0.identifier()
    }

    pub fn target(&self) -> Target {
        self.0.target()
    }
}

impl Iterator for ProbeSession {
    type Item = PingResult<ProbeOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// Opens a raw socket for `target` and prepares a session. Nothing is sent until the
/// first outcome is requested.
pub fn create(config: &SessionConfig, target: Target) -> PingResult<ProbeSession> {
    check_session(config, target)?;
    let socket = RawSocket::open(config.address_family)?;
    Ok(ProbeSession(create_with_socket(config, target, socket)))
}

fn check_session(config: &SessionConfig, target: Target) -> PingResult<()> {
    config.validate()?;
    if target.address_family() != config.address_family {
        return Err(PingError::UnresolvedTarget(format!(
            "{target} is not an {} address",
            config.address_family
        )));
    }
    Ok(())
}

fn create_with_socket<S>(config: &SessionConfig, target: Target, socket: S) -> crate::details::ProbeSession<S>
where
    S: TSocket,
{
    let identifier: u16 = rand::random();
    tracing::trace!("probe session to {} with identifier {:#06x}", target, identifier);
    let icmp_echo = IcmpEcho::new(socket, config.address_family, identifier);
    crate::details::ProbeSession::new(icmp_echo, target, config.clone())
}
