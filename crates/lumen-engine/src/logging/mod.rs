//! Logging utilities.
//!
//! The engine logs through the `log` facade only. Binaries and tests that want
//! output call [`init_logging`] once; libraries embedding the renderer are free
//! to install a different backend.

mod init;

pub use init::{init_logging, LoggingConfig};
