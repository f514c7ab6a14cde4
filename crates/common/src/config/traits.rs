//! # Configuration Traits

use crate::error::MonitorErrorKind;

/// Common configuration validation trait
pub trait ConfigValidation {
    type Error: MonitorErrorKind;

    /// Validate the configuration
    fn validate(&self) -> Result<(), Self::Error>;

    /// Get configuration warnings (non-fatal issues)
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }
}
