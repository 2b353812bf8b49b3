//! Logger initialization.
//!
//! The crate itself only uses the `log` facade; binaries pick the backend.

mod init;

pub use init::{init_logging, LoggingConfig};
