pub(crate) mod checksum;
pub(crate) mod codec;
mod icmp_echo;
pub(crate) use icmp_echo::IcmpEcho;

mod sequence_number;
pub(crate) use sequence_number::SequenceNumber;

pub(crate) mod socket;
pub(crate) use socket::raw_socket::RawSocket;
pub(crate) use socket::TSocket;
