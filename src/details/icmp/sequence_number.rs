use std::fmt;

/// Sequence number of an echo request, the first probe of a session carries 1.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct SequenceNumber(u16);

impl SequenceNumber {
    pub(crate) fn start_value() -> SequenceNumber {
        SequenceNumber(1)
    }

    /// Wraps back to the start value after `u16::MAX`.
    pub(crate) fn next(self) -> Self {
        self.0.checked_add(1).map_or_else(Self::start_value, SequenceNumber)
    }
}

impl From<SequenceNumber> for u16 {
    fn from(value: SequenceNumber) -> Self {
        value.0
    }
}

impl From<u16> for SequenceNumber {
    fn from(value: u16) -> Self {
        SequenceNumber(value)
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
