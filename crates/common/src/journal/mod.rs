//! Logging initialization using tracing + journald
//!
//! Integrates with systemd's journal for service deployments and falls back
//! to console logging for interactive use.

pub mod init;

pub use init::init_journal;
