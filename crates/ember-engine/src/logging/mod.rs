//! Logging utilities.
//!
//! Centralizes logger initialization behind the standard `log` facade.
//! All recoverable engine failures (load-time skips, per-object render
//! errors) are reported through this facade with enough context to diagnose
//! without a debugger.

mod init;

pub use init::{init_logging, LoggingConfig};
