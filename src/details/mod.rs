pub use ping_error::PingError;
pub use ping_result::PingResult;
pub(crate) use probe_session::ProbeSession;

pub(crate) mod icmp;
mod ping_error;
mod ping_result;
mod probe_session;
pub(crate) mod records;
