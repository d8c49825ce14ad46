//! Logging utilities.
//!
//! The engine only emits through the `log` facade. Binaries and tests call
//! `init_logging` once to install an `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
