//! # GPU Monitor
//!
//! Keeps a one-line GPU memory status display up to date from
//! `nvidia-smi` reports.

use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

use common::journal::init_journal;
use gpu_monitor::cli::args::{CliConfig, ConfigGenConfig, RunConfig};
use gpu_monitor::cli::{execute_command, handlers, AppConfig, AppConfigResolver, CliContext, MonitorArgs};
use gpu_monitor::command::NvidiaSmi;
use gpu_monitor::display::display_for;
use gpu_monitor::{DeviceIndex, MemoryMonitor, MonitorConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = MonitorArgs::parse_args();

    match AppConfigResolver::resolve(&args) {
        AppConfig::ConfigGeneration(config) => run_config_generation(config),
        AppConfig::Monitor(config) => run_monitor_mode(config).await,
        AppConfig::Cli(config) => run_cli_mode(config).await,
    }
}

fn run_config_generation(config: ConfigGenConfig) -> Result<()> {
    let toml_content = toml::to_string_pretty(&MonitorConfig::default())?;
    std::fs::write(&config.output_path, toml_content)?;

    println!(
        "Generated configuration file: {}",
        config.output_path.display()
    );
    Ok(())
}

async fn run_monitor_mode(run: RunConfig) -> Result<()> {
    // Loading does not log, so the configured level can drive the subscriber
    let loaded = handlers::load_config(run.config_path.as_deref())?;
    let mut config = loaded.config;
    init_logging(run.log_level.as_deref().unwrap_or(&config.logging.level))?;
    info!("Configuration loaded from {}", loaded.source);
    handlers::report_warnings(&config);

    if run.metrics_enabled {
        config.metrics.enabled = true;
    }
    if let Some(addr) = run.metrics_addr {
        config.metrics.listen_addr = addr;
    }

    if config.metrics.enabled {
        init_metrics(config.metrics.listen_addr)?;
        info!("Metrics server started on: {}", config.metrics.listen_addr);
    }

    let source = NvidiaSmi::from_config(&config.command);
    info!("Using report command: {}", source.program().display());

    let monitor = MemoryMonitor::new(source, display_for(config.display.mode), DeviceIndex::PRIMARY);

    // An unavailable tool is not an error for the host: report and exit quietly
    let handle = match monitor.start().await {
        Ok(handle) => handle,
        Err(e) => {
            info!("GPU monitor inactive: {}", e);
            return Ok(());
        }
    };

    signal::ctrl_c().await?;
    info!("Received shutdown signal, stopping GPU monitor...");

    handle
        .stop()
        .await
        .map_err(|e| anyhow!("Polling task failed: {}", e))?;

    info!("GPU monitor stopped");
    Ok(())
}

async fn run_cli_mode(config: CliConfig) -> Result<()> {
    init_logging(config.log_level.as_deref().unwrap_or("warn"))?;

    let context = CliContext::new(config.config_path);
    execute_command(&config.command, &context).await
}

fn init_logging(level: &str) -> Result<()> {
    init_journal(level).map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

fn init_metrics(addr: SocketAddr) -> Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow!("Failed to install metrics exporter: {}", e))
}
