//! External diagnostic command invocation
//!
//! The monitor only needs "give me the current report text"; [`ReportSource`]
//! is that seam, and [`NvidiaSmi`] is the production implementation.

pub mod discovery;
pub mod nvidia_smi;

pub use discovery::find_command;
pub use nvidia_smi::NvidiaSmi;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Producer of raw memory reports
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Run the diagnostic command once and return its standard output
    async fn fetch_report(&self) -> Result<String, CommandError>;
}

/// Failures running the diagnostic command
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be started (missing binary, permissions)
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program exited unsuccessfully
    #[error("{program} exited with {status}: {stderr}")]
    NonZeroExit {
        program: String,
        status: String,
        stderr: String,
    },

    /// The program succeeded but wrote to its error stream
    #[error("{program} reported an error: {stderr}")]
    StderrOutput { program: String, stderr: String },

    /// The program did not finish in time and was killed
    #[error("{program} did not finish within {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
}

impl common::MonitorErrorKind for CommandError {}

impl CommandError {
    /// Short machine-friendly cause, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Spawn { .. } => "spawn",
            Self::NonZeroExit { .. } => "exit_status",
            Self::StderrOutput { .. } => "stderr",
            Self::TimedOut { .. } => "timeout",
        }
    }
}
