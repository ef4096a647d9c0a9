use super::codec::{self, DecodedReply};
use super::TSocket;
use crate::details::icmp::SequenceNumber;
use crate::details::records::{Probe, RawReply};
use crate::details::{PingError, PingResult};
use crate::AddressFamily;
use rand::distributions::Uniform;
use rand::Rng;
use std::net::{IpAddr, SocketAddr};
use std::time::Instant;

// Large enough for an IPv4 header plus an echo reply of the default size.
const RECEIVE_BUFFER_SIZE: usize = 1024;

pub(crate) struct IcmpEcho<S> {
    socket: S,
    address_family: AddressFamily,
    identifier: u16,
}

impl<S> IcmpEcho<S>
where
    S: TSocket,
{
    pub(crate) fn new(socket: S, address_family: AddressFamily, identifier: u16) -> IcmpEcho<S> {
        IcmpEcho { socket, address_family, identifier }
    }

    pub(crate) fn address_family(&self) -> AddressFamily {
        self.address_family
    }

    pub(crate) fn identifier(&self) -> u16 {
        self.identifier
    }

    pub(crate) fn send_to(
        &self,
        ip_addr: IpAddr,
        sequence_number: SequenceNumber,
        payload_size: usize,
    ) -> PingResult<Probe> {
        let payload = new_payload(payload_size);
        let package = codec::encode(self.address_family, self.identifier, sequence_number, &payload)
            .ok_or_else(|| PingError::InvalidConfig(format!("no echo request with {payload_size} bytes of payload")))?;
        let addr: socket2::SockAddr = SocketAddr::new(ip_addr, 0).into();

        let send_time = Instant::now();
        self.socket.send_to(&package, &addr)?;
        tracing::trace!("echo request {} sent to {}", sequence_number, ip_addr);

        Ok(Probe { sequence_number, identifier: self.identifier, payload, send_time })
    }

    pub(crate) fn try_receive(&self, deadline: Instant) -> PingResult<Option<RawReply>> {
        let mut buf = [0u8; RECEIVE_BUFFER_SIZE];
        match self.socket.receive_with_deadline(&mut buf, deadline)? {
            None => Ok(None),
            Some(n_bytes) => {
                let receive_time = Instant::now();
                tracing::trace!("received {} bytes", n_bytes);
                Ok(Some(RawReply { bytes: buf[..n_bytes].to_vec(), receive_time }))
            }
        }
    }

    /// Raw sockets on loopback also see the requests this session sent.
    pub(crate) fn is_own_request(&self, reply: &DecodedReply) -> bool {
        reply.icmp_type == self.address_family.echo_request_type() && reply.identifier == self.identifier
    }
}

fn new_payload(payload_size: usize) -> Vec<u8> {
    let filler = Uniform::new_inclusive(b'a', b'z');
    rand::thread_rng().sample_iter(filler).take(payload_size).collect()
}
