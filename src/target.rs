use crate::details::PingError;
use crate::PingResult;
use std::fmt;
use std::net::IpAddr;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub(crate) fn of(ip_addr: IpAddr) -> Self {
        match ip_addr {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }

    pub(crate) fn echo_request_type(self) -> u8 {
        match self {
            AddressFamily::V4 => 8,
            AddressFamily::V6 => 128,
        }
    }

    pub(crate) fn echo_reply_type(self) -> u8 {
        match self {
            AddressFamily::V4 => 0,
            AddressFamily::V6 => 129,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// A resolved address to probe. Name resolution happens before a `Target` exists.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Target {
    ip_addr: IpAddr,
}

impl Target {
    /// Parses a numeric address of the given family. Host names are rejected.
    pub fn parse(address: &str, address_family: AddressFamily) -> PingResult<Self> {
        let ip_addr = address
            .parse::<IpAddr>()
            .map_err(|_| PingError::UnresolvedTarget(address.to_owned()))?;
        if AddressFamily::of(ip_addr) != address_family {
            return Err(PingError::UnresolvedTarget(format!("{address} is not an {address_family} address")));
        }
        Ok(Target { ip_addr })
    }

    pub fn ip_addr(&self) -> IpAddr {
        self.ip_addr
    }

    pub fn address_family(&self) -> AddressFamily {
        AddressFamily::of(self.ip_addr)
    }
}

impl From<IpAddr> for Target {
    fn from(ip_addr: IpAddr) -> Self {
        Target { ip_addr }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip_addr)
    }
}
