//! `nvidia-smi` report source

use super::{find_command, CommandError, ReportSource};
use crate::config::CommandConfig;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Arguments selecting the memory-only query report
pub const REPORT_ARGS: [&str; 3] = ["-q", "-d", "MEMORY"];

/// Runs `nvidia-smi -q -d MEMORY` with a bounded wait
#[derive(Debug, Clone)]
pub struct NvidiaSmi {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl NvidiaSmi {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: REPORT_ARGS.iter().map(|a| a.to_string()).collect(),
            timeout,
        }
    }

    /// Build from configuration, resolving the program through [`find_command`]
    ///
    /// An unresolvable program is kept as configured so the failure surfaces
    /// at probe time like any other spawn error.
    pub fn from_config(config: &CommandConfig) -> Self {
        let program = find_command(&config.program).unwrap_or_else(|| {
            debug!(
                "Could not locate {}, invoking it as configured",
                config.program
            );
            PathBuf::from(&config.program)
        });
        Self::new(program, config.timeout)
    }

    /// Replace the report arguments (used for diagnostics and tests)
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &std::path::Path {
        &self.program
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

#[async_trait]
impl ReportSource for NvidiaSmi {
    async fn fetch_report(&self) -> Result<String, CommandError> {
        debug!("Running {} {}", self.program.display(), self.args.join(" "));

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|source| CommandError::Spawn {
                program: self.program_name(),
                source,
            })?,
            Err(_) => {
                return Err(CommandError::TimedOut {
                    program: self.program_name(),
                    timeout: self.timeout,
                })
            }
        };

        // Trimmed for messages only; any stderr byte at all fails the run
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(CommandError::NonZeroExit {
                program: self.program_name(),
                status: output.status.to_string(),
                stderr,
            });
        }

        if !output.stderr.is_empty() {
            return Err(CommandError::StderrOutput {
                program: self.program_name(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
