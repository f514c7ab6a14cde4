//! CLI interface for the GPU monitor

pub mod args;
pub mod handlers;

use clap::Subcommand;
use std::path::PathBuf;

pub use args::{AppConfig, AppConfigResolver, ApplicationMode, MonitorArgs};
pub use handlers::execute_command;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Probe, then keep the status line updated (default)
    Run,
    /// Take a single reading and print it
    Snapshot {
        /// Print the reading as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse a saved `nvidia-smi -q -d MEMORY` report
    Parse {
        /// Report file
        file: PathBuf,
        /// Device section to read
        #[arg(short, long, default_value = "0")]
        device: usize,
    },
}

pub struct CliContext {
    pub config_path: Option<PathBuf>,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }
}
