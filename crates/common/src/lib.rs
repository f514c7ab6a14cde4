//! # Common
//!
//! Shared plumbing for the GPU monitor workspace.
//!
//! ## Key Features
//! - Layered configuration loading (defaults, TOML file, environment)
//! - Configuration validation trait with non-fatal warnings
//! - Error types shared across crates
//! - Logging initialization with journald fallback to console

pub mod config;
pub mod error;
pub mod journal;

pub use config::*;
pub use error::*;

/// Version of the common crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(VERSION.chars().any(|c| c.is_ascii_digit()));
    }
}
