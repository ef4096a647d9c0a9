use std::io;
use std::time::Instant;

pub(crate) mod raw_socket;

pub(crate) trait TSocket: Send {
    fn send_to(&self, buf: &[u8], addr: &socket2::SockAddr) -> io::Result<usize>;
    /// Waits for one datagram until `deadline`. `Ok(None)` when nothing arrived in time.
    fn receive_with_deadline(&self, buf: &mut [u8], deadline: Instant) -> io::Result<Option<usize>>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::net::IpAddr;
    use std::sync::Arc;
    use std::sync::Mutex;

    use crate::details::icmp::checksum;
    use crate::details::icmp::codec::tests::{icmp_message, ipv4_wrap};
    use crate::AddressFamily;

    #[derive(Clone, Copy, PartialEq, Eq)]
    pub(crate) enum OnSend {
        ReturnErr,
        /// Fails the way `sendto` does when a firewall rule rejects the packet.
        ReturnPermissionDenied,
        ReturnDefault,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub(crate) enum OnReceive {
        /// Blocks until the deadline and reports that nothing arrived.
        Timeout,
        /// Answers the most recent request.
        EchoReply,
        EchoReplyWithSequence(u16),
        EchoReplyWithIdentifier(u16),
        IcmpMessage { icmp_type: u8, icmp_code: u8 },
        /// Loops the most recent request back, as a raw socket on loopback does.
        OwnRequest,
        /// Delivered verbatim, without an IPv4 header added.
        Bytes(Vec<u8>),
        Error,
    }

    type VecOfBuffersAndAddresses = Arc<Mutex<Vec<(Vec<u8>, IpAddr)>>>;

    pub(crate) struct SocketMock {
        address_family: AddressFamily,
        on_send: OnSend,
        on_receive: Arc<Mutex<VecDeque<OnReceive>>>,
        sent: VecOfBuffersAndAddresses,
        received_cnt: Arc<Mutex<u16>>,
    }

    impl Clone for SocketMock {
        fn clone(&self) -> Self {
            SocketMock {
                address_family: self.address_family,
                on_send: self.on_send,
                on_receive: self.on_receive.clone(),
                sent: self.sent.clone(),
                received_cnt: self.received_cnt.clone(),
            }
        }
    }

    impl SocketMock {
        pub(crate) fn new(address_family: AddressFamily, on_send: OnSend, on_receive: Vec<OnReceive>) -> Self {
            Self {
                address_family,
                on_send,
                on_receive: Arc::new(Mutex::new(on_receive.into())),
                sent: Arc::new(Mutex::new(vec![])),
                received_cnt: Arc::new(Mutex::new(0)),
            }
        }

        pub(crate) fn replying(on_receive: Vec<OnReceive>) -> Self {
            Self::new(AddressFamily::V4, OnSend::ReturnDefault, on_receive)
        }

        pub(crate) fn should_send_number_of_messages(&self, n: usize) -> &Self {
            assert_eq!(n, self.sent.lock().unwrap().len());
            self
        }

        pub(crate) fn should_send_to_address(&self, addr: &IpAddr) -> &Self {
            assert!(self.sent.lock().unwrap().iter().any(|e| *addr == e.1));
            self
        }

        pub(crate) fn should_receive_number_of_messages(&self, n: u16) -> &Self {
            assert_eq!(n, *self.received_cnt.lock().unwrap());
            self
        }

        pub(crate) fn sent_messages(&self) -> Vec<Vec<u8>> {
            self.sent.lock().unwrap().iter().map(|(buf, _)| buf.clone()).collect()
        }

        fn last_sent(&self) -> io::Result<Vec<u8>> {
            self.sent
                .lock()
                .unwrap()
                .last()
                .map(|(buf, _)| buf.clone())
                .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "nothing sent to reply to"))
        }

        fn echo_reply(&self, identifier: Option<u16>, sequence_number: Option<u16>) -> io::Result<Vec<u8>> {
            let mut reply = self.last_sent()?;
            reply[0] = self.address_family.echo_reply_type();
            if let Some(identifier) = identifier {
                reply[4..6].copy_from_slice(&identifier.to_be_bytes());
            }
            if let Some(sequence_number) = sequence_number {
                reply[6..8].copy_from_slice(&sequence_number.to_be_bytes());
            }
            reply[2..4].copy_from_slice(&[0, 0]);
            let checksum = checksum::checksum(&reply);
            reply[2..4].copy_from_slice(&checksum.to_be_bytes());
            Ok(reply)
        }

        fn with_ip_header(&self, icmp: &[u8]) -> Vec<u8> {
            match self.address_family {
                AddressFamily::V4 => ipv4_wrap(icmp),
                AddressFamily::V6 => icmp.to_vec(),
            }
        }
    }

    impl TSocket for SocketMock {
        fn send_to(&self, buf: &[u8], addr: &socket2::SockAddr) -> io::Result<usize> {
            match self.on_send {
                OnSend::ReturnErr => return Err(io::Error::new(io::ErrorKind::Other, "simulating error in mock")),
                OnSend::ReturnPermissionDenied => return Err(io::Error::from_raw_os_error(1)),
                OnSend::ReturnDefault => {}
            }
            let ip_addr = addr
                .as_socket()
                .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no IP address in SockAddr"))?
                .ip();
            self.sent.lock().unwrap().push((buf.to_vec(), ip_addr));
            Ok(buf.len())
        }

        fn receive_with_deadline(&self, buf: &mut [u8], deadline: Instant) -> io::Result<Option<usize>> {
            let on_receive = self.on_receive.lock().unwrap().pop_front().unwrap_or(OnReceive::Timeout);
            let package = match on_receive {
                OnReceive::Timeout => {
                    std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    return Ok(None);
                }
                OnReceive::Error => {
                    return Err(io::Error::new(io::ErrorKind::Other, "simulating receive error in mock"));
                }
                OnReceive::EchoReply => self.with_ip_header(&self.echo_reply(None, None)?),
                OnReceive::EchoReplyWithSequence(sequence_number) => {
                    self.with_ip_header(&self.echo_reply(None, Some(sequence_number))?)
                }
                OnReceive::EchoReplyWithIdentifier(identifier) => {
                    self.with_ip_header(&self.echo_reply(Some(identifier), None)?)
                }
                OnReceive::IcmpMessage { icmp_type, icmp_code } => {
                    self.with_ip_header(&icmp_message(icmp_type, icmp_code, 0, 0))
                }
                OnReceive::OwnRequest => self.with_ip_header(&self.last_sent()?),
                OnReceive::Bytes(bytes) => bytes,
            };

            *self.received_cnt.lock().unwrap() += 1;
            let n_bytes = package.len().min(buf.len());
            buf[..n_bytes].copy_from_slice(&package[..n_bytes]);
            Ok(Some(n_bytes))
        }
    }
}
