//! Logging utilities.
//!
//! The engine logs through the `log` facade only; this module offers a
//! one-shot `env_logger` setup for binaries.

mod init;

pub use init::{init_logging, LoggingConfig};
