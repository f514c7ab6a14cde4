//! # Configuration Loader
//!
//! Layers, lowest priority first: compiled defaults, one TOML file, then
//! `<PREFIX>_*` environment variables (`__` separates nested keys).
//!
//! Loading usually happens before logging is set up, so nothing here logs.
//! The caller gets a [`ConfigSource`] back and reports it once a subscriber
//! is installed.

use crate::error::ConfigurationError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no path is given
const DEFAULT_CONFIG_FILE: &str = "gpu-monitor.toml";

/// Environment variable prefix
pub const DEFAULT_ENV_PREFIX: &str = "GPU_MONITOR";

/// Environment variable naming a configuration file to use instead of discovery
pub const CONFIG_PATH_ENV: &str = "GPU_MONITOR_CONFIG_PATH";

/// System-wide and per-user locations, checked after the working directory
const WELL_KNOWN_LOCATIONS: [&str; 2] = [
    "/etc/gpu-monitor/config.toml",
    "~/.config/gpu-monitor/config.toml",
];

/// Where the file layer of a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Values were read from this file
    File(PathBuf),
    /// `GPU_MONITOR_CONFIG_PATH` named a file that does not exist
    MissingFile(PathBuf),
    /// No file was found; defaults and environment only
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::MissingFile(path) => {
                write!(f, "defaults ({} not found)", path.display())
            }
            Self::Defaults => f.write_str("defaults"),
        }
    }
}

/// A configuration value together with its file source
#[derive(Debug, Clone)]
pub struct LoadedConfig<T> {
    pub config: T,
    pub source: ConfigSource,
}

/// Load `T` from `path`, which must exist, plus `GPU_MONITOR_*` variables
pub fn load_from_file<T>(path: &Path) -> Result<T, ConfigurationError>
where
    T: Default + DeserializeOwned + Serialize,
{
    load_layered(Some(path), DEFAULT_ENV_PREFIX).map(|loaded| loaded.config)
}

/// Load `T` and report which file was used
///
/// An explicit `path` is required to exist. Without one the file is
/// discovered: `GPU_MONITOR_CONFIG_PATH`, then `./gpu-monitor.toml`, then the
/// well-known locations. A discovered file that is missing is not an error.
pub fn load_layered<T>(
    path: Option<&Path>,
    env_prefix: &str,
) -> Result<LoadedConfig<T>, ConfigurationError>
where
    T: Default + DeserializeOwned + Serialize,
{
    let source = match path {
        Some(path) if path.exists() => ConfigSource::File(path.to_path_buf()),
        Some(path) => {
            return Err(ConfigurationError::FileNotFound {
                path: path.display().to_string(),
            })
        }
        None => discover_config_file()?,
    };

    let mut figment = Figment::new().merge(Serialized::defaults(T::default()));
    if let ConfigSource::File(path) = &source {
        figment = merge_file(figment, path)?;
    }
    figment = figment.merge(
        Env::prefixed(&format!("{env_prefix}_"))
            .split("__")
            .ignore(&["CONFIG_PATH"]),
    );

    let config = figment
        .extract()
        .map_err(|err| ConfigurationError::ParseError {
            details: format!("Failed to parse configuration: {err}"),
        })?;

    Ok(LoadedConfig { config, source })
}

fn discover_config_file() -> Result<ConfigSource, ConfigurationError> {
    if let Some(env_path) = std::env::var_os(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        return Ok(if path.exists() {
            ConfigSource::File(path)
        } else {
            ConfigSource::MissingFile(path)
        });
    }

    let local = std::env::current_dir()
        .map_err(|e| ConfigurationError::EnvironmentError {
            var: "current_dir".to_string(),
            details: e.to_string(),
        })?
        .join(DEFAULT_CONFIG_FILE);

    let found = std::iter::once(Some(local))
        .chain(WELL_KNOWN_LOCATIONS.iter().map(|location| expand_home(location)))
        .flatten()
        .find(|path| path.exists());

    Ok(found.map_or(ConfigSource::Defaults, ConfigSource::File))
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment, ConfigurationError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        None => Ok(figment.merge(Toml::file(path))),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(figment.merge(Toml::file(path))),
        Some(ext) => Err(ConfigurationError::ParseError {
            details: format!("Unsupported configuration file format: {ext} (supported: toml)"),
        }),
    }
}

/// Expand a leading `~`; `None` when `HOME` is unset
fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix('~') {
        Some(rest) => std::env::var_os("HOME").map(|home| {
            let mut expanded = PathBuf::from(home).into_os_string();
            expanded.push(rest);
            PathBuf::from(expanded)
        }),
        None => Some(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        assert_eq!(
            expand_home("/etc/gpu-monitor/config.toml"),
            Some(PathBuf::from("/etc/gpu-monitor/config.toml"))
        );
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let result = merge_file(Figment::new(), Path::new("config.yaml"));
        assert!(matches!(result, Err(ConfigurationError::ParseError { .. })));
    }

    #[test]
    fn test_config_source_display() {
        let path = PathBuf::from("/tmp/gpu.toml");
        assert_eq!(ConfigSource::File(path.clone()).to_string(), "file /tmp/gpu.toml");
        assert_eq!(
            ConfigSource::MissingFile(path).to_string(),
            "defaults (/tmp/gpu.toml not found)"
        );
        assert_eq!(ConfigSource::Defaults.to_string(), "defaults");
    }
}
