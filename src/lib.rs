#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! ICMP echo probing over raw sockets.
//!
//! A [`ProbeSession`] sends `max_number_of_times` echo requests to one resolved
//! [`Target`], waits up to `timeout` for each reply and yields one [`ProbeOutcome`]
//! per request. Raw sockets need elevated privileges on every platform; without them
//! [`create`] fails with [`PingError::PermissionDenied`].

pub use details::{PingError, PingResult};
pub use ping_probe::*;
pub use probe_outcome::{ProbeOutcome, ReplyError};
pub use session_config::SessionConfig;
pub use target::{AddressFamily, Target};

mod details;
mod ping_probe;
mod probe_outcome;
mod session_config;
mod target;
