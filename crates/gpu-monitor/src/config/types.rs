//! Configuration types

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use common::config::{loader, LoadedConfig, DEFAULT_ENV_PREFIX};

/// Main monitor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Diagnostic command settings
    pub command: CommandConfig,

    /// Status display settings
    pub display: DisplayConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Prometheus exporter settings
    pub metrics: MetricsConfig,
}

impl MonitorConfig {
    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Ok(loader::load_from_file::<Self>(path)?)
    }

    /// Load from `path` (required) or by discovery, keeping the file source
    pub fn load_with_source(path: Option<&Path>) -> Result<LoadedConfig<Self>> {
        Ok(loader::load_layered::<Self>(path, DEFAULT_ENV_PREFIX)?)
    }
}

/// Diagnostic command configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Program name or path; bare names are searched on PATH and in
    /// well-known driver locations
    pub program: String,

    /// Maximum time a single invocation may take before it is killed
    pub timeout: Duration,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            program: "nvidia-smi".to_string(),
            timeout: Duration::from_millis(1500),
        }
    }
}

/// How the status line is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Redraw a single line in place on stdout
    #[default]
    Terminal,
    /// Emit each new value as a log event
    Log,
}

/// Status display configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Prometheus exporter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Whether to serve metrics over HTTP
    pub enabled: bool,

    /// Exporter listen address
    pub listen_addr: SocketAddr,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 9400)),
        }
    }
}
