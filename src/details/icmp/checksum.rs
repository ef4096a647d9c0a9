/// Internet checksum (RFC 1071) over `bytes`, to be stored in network byte order.
///
/// The buffer is summed as big-endian 16-bit words. An odd trailing byte is the
/// high byte of a last word whose low byte is zero. Carries are folded back into
/// the low 16 bits before taking the one's complement.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn checksum(bytes: &[u8]) -> u16 {
    let mut sum: u64 = 0;
    let mut words = bytes.chunks_exact(2);
    for word in &mut words {
        sum += u64::from(u16::from_be_bytes([word[0], word[1]]));
    }
    if let [last] = words.remainder() {
        sum += u64::from(*last) << 8;
    }
    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    // The loop leaves at most 16 significant bits.
    !(sum as u16)
}

/// True when a complete message, checksum field included, sums to zero.
pub(crate) fn verify(bytes: &[u8]) -> bool {
    checksum(bytes) == 0
}
