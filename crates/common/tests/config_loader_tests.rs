//! Integration tests for layered configuration loading

use common::config::{load_from_file, load_layered, ConfigSource, CONFIG_PATH_ENV};
use common::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SampleConfig {
    name: String,
    retries: u32,
    nested: NestedConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NestedConfig {
    enabled: bool,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            retries: 3,
            nested: NestedConfig { enabled: false },
        }
    }
}

fn write_toml(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_file_values_override_defaults() {
    let file = write_toml(
        r#"
name = "from-file"

[nested]
enabled = true
"#,
    );

    let config: SampleConfig = load_from_file(file.path()).unwrap();

    assert_eq!(config.name, "from-file");
    assert_eq!(config.retries, 3);
    assert!(config.nested.enabled);
}

#[test]
#[serial]
fn test_missing_required_file_is_reported() {
    let path = PathBuf::from("/nonexistent/gpu-monitor-test.toml");

    let result = load_from_file::<SampleConfig>(&path);

    assert!(matches!(result, Err(ConfigurationError::FileNotFound { .. })));
}

#[test]
#[serial]
fn test_explicit_file_is_reported_as_source() {
    let file = write_toml("retries = 4\n");

    let loaded = load_layered::<SampleConfig>(Some(file.path()), "GPU_MONITOR_LOADER_TEST").unwrap();

    assert_eq!(loaded.config.retries, 4);
    assert_eq!(loaded.source, ConfigSource::File(file.path().to_path_buf()));
}

#[test]
#[serial]
fn test_missing_discovered_file_falls_back_to_defaults() {
    let path = PathBuf::from("/nonexistent/gpu-monitor-test.toml");
    std::env::set_var(CONFIG_PATH_ENV, &path);

    let result = load_layered::<SampleConfig>(None, "GPU_MONITOR_LOADER_TEST");

    std::env::remove_var(CONFIG_PATH_ENV);

    let loaded = result.unwrap();
    assert_eq!(loaded.config, SampleConfig::default());
    assert_eq!(loaded.source, ConfigSource::MissingFile(path));
}

#[test]
#[serial]
fn test_discovered_file_from_environment_is_loaded() {
    let file = write_toml("name = \"discovered\"\n");
    std::env::set_var(CONFIG_PATH_ENV, file.path());

    let result = load_layered::<SampleConfig>(None, "GPU_MONITOR_LOADER_TEST");

    std::env::remove_var(CONFIG_PATH_ENV);

    let loaded = result.unwrap();
    assert_eq!(loaded.config.name, "discovered");
    assert_eq!(loaded.source, ConfigSource::File(file.path().to_path_buf()));
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let file = write_toml("retries = 5\n");
    std::env::set_var("GPU_MONITOR_ENV_TEST_RETRIES", "9");
    std::env::set_var("GPU_MONITOR_ENV_TEST_NESTED__ENABLED", "true");

    let result = load_layered::<SampleConfig>(Some(file.path()), "GPU_MONITOR_ENV_TEST");

    std::env::remove_var("GPU_MONITOR_ENV_TEST_RETRIES");
    std::env::remove_var("GPU_MONITOR_ENV_TEST_NESTED__ENABLED");

    let config = result.unwrap().config;
    assert_eq!(config.retries, 9);
    assert!(config.nested.enabled);
}

#[test]
#[serial]
fn test_malformed_file_is_parse_error() {
    let file = write_toml("retries = \"many\"\n");

    let result = load_from_file::<SampleConfig>(file.path());

    assert!(matches!(result, Err(ConfigurationError::ParseError { .. })));
}
