use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum PingError {
    /// The environment refused to create a raw socket.
    PermissionDenied(io::Error),
    /// The target is not a numeric address of the requested family.
    UnresolvedTarget(String),
    /// A received buffer is too short to hold the expected headers.
    MalformedReply { length: usize },
    InvalidConfig(String),
    Io(io::Error),
}

impl fmt::Display for PingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "PingError")?;
        match self {
            PingError::PermissionDenied(e) => write!(f, ": permission denied creating raw socket: {e}"),
            PingError::UnresolvedTarget(target) => write!(f, ": unresolved target: {target}"),
            PingError::MalformedReply { length } => write!(f, ": malformed reply of {length} bytes"),
            PingError::InvalidConfig(message) => write!(f, ": invalid config: {message}"),
            PingError::Io(e) => write!(f, ": {e}"),
        }
    }
}

impl Error for PingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PingError::PermissionDenied(e) | PingError::Io(e) => Some(e),
            _ => None,
        }
    }
}

// Only socket creation reports `PermissionDenied`, a refused send mid-session is plain I/O.
impl From<io::Error> for PingError {
    fn from(error: io::Error) -> PingError {
        PingError::Io(error)
    }
}
