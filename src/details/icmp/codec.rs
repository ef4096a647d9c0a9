use crate::details::icmp::checksum;
use crate::details::icmp::SequenceNumber;
use crate::details::PingError;
use crate::AddressFamily;
use pnet_packet::icmp::echo_reply::EchoReplyPacket;
use pnet_packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet_packet::icmp::{IcmpCode, IcmpType};
use pnet_packet::ipv4::Ipv4Packet;
use pnet_packet::Packet;

pub(crate) const ICMP_HEADER_SIZE: usize = 8;
const IPV4_MIN_HEADER_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DecodedReply {
    pub icmp_type: u8,
    pub icmp_code: u8,
    pub identifier: u16,
    pub sequence_number: SequenceNumber,
}

/// Lays out an echo request: type, code, checksum, identifier and sequence number in
/// network byte order, followed by the payload.
pub(crate) fn encode(
    address_family: AddressFamily,
    identifier: u16,
    sequence_number: SequenceNumber,
    payload: &[u8],
) -> Option<Vec<u8>> {
    let buf = vec![0u8; MutableEchoRequestPacket::minimum_packet_size() + payload.len()];
    let mut package = MutableEchoRequestPacket::owned(buf)?;
    package.set_icmp_type(IcmpType::new(address_family.echo_request_type()));
    package.set_icmp_code(IcmpCode::new(0));
    package.set_identifier(identifier);
    package.set_sequence_number(sequence_number.into());
    package.set_payload(payload);

    // The checksum field is still zero here.
    let checksum = checksum::checksum(package.packet());
    package.set_checksum(checksum);
    Some(package.packet().to_vec())
}

/// Extracts the ICMP header fields from a buffer read off a raw socket.
///
/// IPv4 raw sockets deliver the IP header in front of the ICMP message, its length is
/// taken from the IHL field. ICMPv6 messages start at offset 0.
pub(crate) fn decode(buffer: &[u8], address_family: AddressFamily) -> Result<DecodedReply, PingError> {
    let malformed = || PingError::MalformedReply { length: buffer.len() };

    let icmp_bytes = match address_family {
        AddressFamily::V4 => {
            let ipv4_packet = Ipv4Packet::new(buffer).ok_or_else(malformed)?;
            let header_length = usize::from(ipv4_packet.get_header_length()) * 4;
            if header_length < IPV4_MIN_HEADER_SIZE {
                return Err(malformed());
            }
            buffer.get(header_length..).ok_or_else(malformed)?
        }
        AddressFamily::V6 => buffer,
    };

    let reply = EchoReplyPacket::new(icmp_bytes).ok_or_else(malformed)?;
    if address_family == AddressFamily::V4 && !checksum::verify(icmp_bytes) {
        tracing::debug!("ICMP checksum mismatch in reply of {} bytes", icmp_bytes.len());
    }

    Ok(DecodedReply {
        icmp_type: reply.get_icmp_type().0,
        icmp_code: reply.get_icmp_code().0,
        identifier: reply.get_identifier(),
        sequence_number: reply.get_sequence_number().into(),
    })
}
