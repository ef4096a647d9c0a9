use crate::details::icmp::SequenceNumber;
use std::time::Instant;

/// One echo request as it went out on the wire.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Probe {
    pub sequence_number: SequenceNumber,
    pub identifier: u16,
    pub payload: Vec<u8>,
    pub send_time: Instant,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawReply {
    pub bytes: Vec<u8>,
    pub receive_time: Instant,
}
