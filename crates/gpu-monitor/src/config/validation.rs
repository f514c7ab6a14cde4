//! Configuration validation implementation

use common::config::ConfigValidation;
use common::error::ConfigurationError;

use super::MonitorConfig;
use crate::monitor::POLL_INTERVAL;

impl ConfigValidation for MonitorConfig {
    type Error = ConfigurationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.command.program.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                key: "command.program".to_string(),
                value: self.command.program.clone(),
                reason: "program must not be empty".to_string(),
            });
        }

        if self.command.timeout.is_zero() {
            return Err(ConfigurationError::InvalidValue {
                key: "command.timeout".to_string(),
                value: format!("{:?}", self.command.timeout),
                reason: "timeout must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.command.timeout >= POLL_INTERVAL {
            warnings.push(format!(
                "command.timeout ({:?}) is not shorter than the poll interval ({:?}); slow cycles will delay later ones",
                self.command.timeout, POLL_INTERVAL
            ));
        }

        if self.metrics.enabled && self.metrics.listen_addr.ip().is_unspecified() {
            warnings.push(format!(
                "metrics exporter listens on all interfaces ({})",
                self.metrics.listen_addr
            ));
        }

        warnings
    }
}
