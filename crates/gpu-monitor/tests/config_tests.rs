//! Configuration loading tests

use common::config::ConfigValidation;
use gpu_monitor::config::{DisplayMode, MonitorConfig};
use serial_test::serial;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_toml(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_monitor_config_default() {
    let config = MonitorConfig::default();

    assert_eq!(config.command.program, "nvidia-smi");
    assert_eq!(config.command.timeout, Duration::from_millis(1500));
    assert_eq!(config.display.mode, DisplayMode::Terminal);
    assert_eq!(config.logging.level, "info");
    assert!(!config.metrics.enabled);
    assert_eq!(config.metrics.listen_addr.port(), 9400);
}

#[test]
#[serial]
fn test_load_partial_config_from_toml() {
    let file = write_toml(
        r#"
[command]
program = "/usr/local/nvidia/bin/nvidia-smi"

[display]
mode = "log"

[metrics]
enabled = true
listen_addr = "127.0.0.1:9500"
"#,
    );

    let config = MonitorConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.command.program, "/usr/local/nvidia/bin/nvidia-smi");
    assert_eq!(config.command.timeout, Duration::from_millis(1500));
    assert_eq!(config.display.mode, DisplayMode::Log);
    assert!(config.metrics.enabled);
    assert_eq!(config.metrics.listen_addr.port(), 9500);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_generated_config_loads_back() {
    let generated = toml::to_string_pretty(&MonitorConfig::default()).unwrap();
    let file = write_toml(&generated);

    let config = MonitorConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config, MonitorConfig::default());
}

#[test]
#[serial]
fn test_environment_overrides_program() {
    let file = write_toml("[command]\nprogram = \"from-file\"\n");
    std::env::set_var("GPU_MONITOR_COMMAND__PROGRAM", "from-env");

    let result = MonitorConfig::load_from_file(file.path());
    std::env::remove_var("GPU_MONITOR_COMMAND__PROGRAM");

    assert_eq!(result.unwrap().command.program, "from-env");
}

#[test]
#[serial]
fn test_unknown_display_mode_rejected() {
    let file = write_toml("[display]\nmode = \"statusbar\"\n");

    assert!(MonitorConfig::load_from_file(file.path()).is_err());
}
