use crate::details::PingError;
use crate::{AddressFamily, PingResult};
use std::time::Duration;

// Largest payload that fits into one IPv4 datagram next to the IP and ICMP headers.
pub(crate) const MAX_PAYLOAD_SIZE: usize = 65_507;
// Upper bound for `timeout` and `interval`, keeps deadline arithmetic on `Instant` in range.
pub(crate) const MAX_WAIT: Duration = Duration::from_secs(60 * 60);

#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long to wait for the reply to one probe.
    pub timeout: Duration,
    /// Number of payload bytes after the ICMP header.
    pub packet_size: usize,
    /// Delay between the outcome of one probe and the next send.
    pub interval: Duration,
    pub max_number_of_times: u16,
    pub address_family: AddressFamily,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            timeout: Duration::from_millis(1300),
            packet_size: 32,
            interval: Duration::from_millis(500),
            max_number_of_times: 4,
            address_family: AddressFamily::V4,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> PingResult<()> {
        if self.max_number_of_times == 0 {
            return Err(PingError::InvalidConfig("max_number_of_times must be at least 1".to_owned()));
        }
        if self.packet_size > MAX_PAYLOAD_SIZE {
            return Err(PingError::InvalidConfig(format!(
                "packet_size {} exceeds {MAX_PAYLOAD_SIZE}",
                self.packet_size
            )));
        }
        if self.timeout > MAX_WAIT {
            return Err(PingError::InvalidConfig(format!("timeout {:?} exceeds {MAX_WAIT:?}", self.timeout)));
        }
        if self.interval > MAX_WAIT {
            return Err(PingError::InvalidConfig(format!("interval {:?} exceeds {MAX_WAIT:?}", self.interval)));
        }
        Ok(())
    }
}
