use super::TSocket;
use crate::details::PingError;
use crate::AddressFamily;
use socket2::{Domain, Protocol, Type};
use std::io;
use std::mem::MaybeUninit;
use std::time::{Duration, Instant};

// `SO_RCVTIMEO` has microsecond resolution and a zero timeval means "block forever".
const MIN_READ_TIMEOUT: Duration = Duration::from_micros(1);

pub(crate) struct RawSocket {
    socket: socket2::Socket,
}

impl RawSocket {
    /// Opens a raw ICMP socket. Refusal by the OS is `PingError::PermissionDenied`.
    pub(crate) fn open(address_family: AddressFamily) -> Result<Self, PingError> {
        tracing::trace!("creating RawSocket for {}", address_family);
        let (domain, protocol) = match address_family {
            AddressFamily::V4 => (Domain::IPV4, Protocol::ICMPV4),
            AddressFamily::V6 => (Domain::IPV6, Protocol::ICMPV6),
        };
        let socket = socket2::Socket::new(domain, Type::RAW, Some(protocol)).map_err(open_error)?;
        Ok(RawSocket { socket })
    }
}

fn open_error(error: io::Error) -> PingError {
    if error.kind() == io::ErrorKind::PermissionDenied {
        PingError::PermissionDenied(error)
    } else {
        PingError::Io(error)
    }
}

/// Read timeout that expires at `deadline`, `None` once it has passed.
fn read_timeout(deadline: Instant, now: Instant) -> Option<Duration> {
    let remaining = deadline.saturating_duration_since(now);
    if remaining.is_zero() {
        None
    } else {
        Some(remaining.max(MIN_READ_TIMEOUT))
    }
}

impl TSocket for RawSocket {
    fn send_to(&self, buf: &[u8], addr: &socket2::SockAddr) -> io::Result<usize> {
        self.socket.send_to(buf, addr)
    }

    fn receive_with_deadline(&self, buf: &mut [u8], deadline: Instant) -> io::Result<Option<usize>> {
        loop {
            let Some(remaining) = read_timeout(deadline, Instant::now()) else {
                return Ok(None);
            };
            // The receive timeout is the readiness wait, the kernel wakes us on data or expiry.
            self.socket.set_read_timeout(Some(remaining))?;

            // Socket2 gives a safety guaranty which allows us to do an unsafe cast from `&mut [u8]`
            // to `&mut [std::mem::MaybeUninit<u8>]`: it never writes uninitialised bytes.
            // https://docs.rs/socket2/0.4.7/socket2/struct.Socket.html#method.recv
            //
            // On a RAW IPv4 socket we get the whole IP packet.
            let uninit_buf = unsafe { &mut *(&mut *buf as *mut [u8] as *mut [MaybeUninit<u8>]) };
            match self.socket.recv(uninit_buf) {
                Ok(n_bytes) => return Ok(Some(n_bytes)),
                Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                    return Ok(None);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}
