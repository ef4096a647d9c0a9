/// Result of one probe. A session yields exactly one per probe, in sequence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success { round_trip_ms: u64 },
    Timeout,
    ProtocolError(ReplyError),
}

/// Why a received buffer did not satisfy the awaited probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyError {
    /// Not an echo reply, or an echo reply for another identifier or sequence number.
    UnexpectedReply { icmp_type: u8, icmp_code: u8 },
    MalformedReply { length: usize },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }
}
