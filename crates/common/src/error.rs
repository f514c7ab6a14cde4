//! Error handling shared across the workspace
//!
//! Library code returns `thiserror` enums; binaries wrap them in `anyhow`.

use thiserror::Error;

/// Marker trait for errors produced by workspace crates
///
/// All implementors are thread-safe and `'static` so they can cross task
/// boundaries and be boxed into `anyhow::Error`.
pub trait MonitorErrorKind: std::error::Error + Send + Sync + 'static {}

/// Configuration-related errors
///
/// These errors occur during configuration loading, parsing, or validation.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration parsing failed
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for {key}: {value} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// Environment variable error
    #[error("Environment variable error for {var}: {details}")]
    EnvironmentError { var: String, details: String },
}

impl MonitorErrorKind for ConfigurationError {}
