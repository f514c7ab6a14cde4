//! CLI argument parsing and application mode resolution

use super::Commands;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main application arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct MonitorArgs {
    /// Configuration file path (defaults to the layered lookup)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Enable the Prometheus metrics endpoint
    #[arg(long)]
    pub metrics: bool,

    /// Metrics server address
    #[arg(long)]
    pub metrics_addr: Option<SocketAddr>,

    /// Write a configuration file with default values and exit
    #[arg(long)]
    pub gen_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl MonitorArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn get_mode(&self) -> ApplicationMode {
        if self.gen_config {
            ApplicationMode::GenerateConfig
        } else {
            match self.command {
                None | Some(Commands::Run) => ApplicationMode::Monitor,
                Some(_) => ApplicationMode::Cli,
            }
        }
    }
}

/// Application operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationMode {
    /// Generate configuration file and exit
    GenerateConfig,
    /// Long-running status line
    Monitor,
    /// Execute a one-shot command and exit
    Cli,
}

/// Monitor mode settings from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub config_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub metrics_enabled: bool,
    pub metrics_addr: Option<SocketAddr>,
}

/// One-shot command settings
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub config_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub command: Commands,
}

/// Configuration generation settings
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigGenConfig {
    pub output_path: PathBuf,
}

/// Default output file for `--gen-config`
const DEFAULT_GENERATED_CONFIG: &str = "gpu-monitor.toml";

pub struct AppConfigResolver;

impl AppConfigResolver {
    pub fn resolve(args: &MonitorArgs) -> AppConfig {
        match args.get_mode() {
            ApplicationMode::GenerateConfig => AppConfig::ConfigGeneration(ConfigGenConfig {
                output_path: args
                    .config
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_GENERATED_CONFIG)),
            }),
            ApplicationMode::Monitor => AppConfig::Monitor(RunConfig {
                config_path: args.config.clone(),
                log_level: args.log_level.clone(),
                metrics_enabled: args.metrics,
                metrics_addr: args.metrics_addr,
            }),
            ApplicationMode::Cli => AppConfig::Cli(CliConfig {
                config_path: args.config.clone(),
                log_level: args.log_level.clone(),
                command: args.command.clone().unwrap_or(Commands::Run),
            }),
        }
    }
}

/// Unified application configuration
#[derive(Debug, Clone, PartialEq)]
pub enum AppConfig {
    ConfigGeneration(ConfigGenConfig),
    Monitor(RunConfig),
    Cli(CliConfig),
}
