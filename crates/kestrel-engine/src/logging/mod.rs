//! Logger initialization.
//!
//! The engine logs exclusively through the `log` facade; this module wires
//! up the `env_logger` backend for hosts that do not bring their own.

mod init;

pub use init::{LoggingConfig, init_logging};
