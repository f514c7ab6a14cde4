//! One-shot command handlers

use super::{CliContext, Commands};
use crate::command::{NvidiaSmi, ReportSource};
use crate::config::MonitorConfig;
use crate::report::{parse_report, DeviceIndex, MemoryReading};
use anyhow::{bail, Context, Result};
use common::config::{ConfigValidation, LoadedConfig};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

pub async fn execute_command(command: &Commands, context: &CliContext) -> Result<()> {
    match command {
        Commands::Run => bail!("`run` starts the monitor and is not a one-shot command"),
        Commands::Snapshot { json } => {
            let loaded = load_config(context.config_path.as_deref())?;
            debug!("Configuration loaded from {}", loaded.source);
            let config = loaded.config;
            report_warnings(&config);
            let reading = take_snapshot(&config).await?;
            print_reading(DeviceIndex::PRIMARY, &reading, *json)
        }
        Commands::Parse { file, device } => {
            let device = DeviceIndex::new(*device);
            let reading = parse_report_file(file, device)?;
            print_reading(device, &reading, false)
        }
    }
}

/// Load and validate the monitor configuration
///
/// Does not log: the caller reports `source` once logging is initialized.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig<MonitorConfig>> {
    let loaded = MonitorConfig::load_with_source(path)?;
    loaded.config.validate()?;
    Ok(loaded)
}

/// Log non-fatal configuration issues
pub fn report_warnings(config: &MonitorConfig) {
    for warning in config.warnings() {
        warn!("Configuration warning: {}", warning);
    }
}

/// Run the diagnostic command once and read the primary device
pub async fn take_snapshot(config: &MonitorConfig) -> Result<MemoryReading> {
    let source = NvidiaSmi::from_config(&config.command);
    let report = source.fetch_report().await?;
    Ok(parse_report(&report, DeviceIndex::PRIMARY)?)
}

/// Parse a report saved to disk
pub fn parse_report_file(path: &Path, device: DeviceIndex) -> Result<MemoryReading> {
    let report = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    parse_report(&report, device)
        .with_context(|| format!("Failed to parse report {}", path.display()))
}

#[derive(Serialize)]
struct ReadingOutput<'a> {
    device: DeviceIndex,
    #[serde(flatten)]
    reading: &'a MemoryReading,
    total_mb: u64,
}

fn print_reading(device: DeviceIndex, reading: &MemoryReading, json: bool) -> Result<()> {
    if json {
        let output = ReadingOutput {
            device,
            reading,
            total_mb: reading.total_mb(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", reading.status_text(device));
    }
    Ok(())
}
