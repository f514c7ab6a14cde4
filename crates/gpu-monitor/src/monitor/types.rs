//! Monitor state and error types

use crate::command::CommandError;
use crate::report::ReportParseError;
use std::fmt;
use thiserror::Error;

/// Lifecycle of a [`MemoryMonitor`](super::MemoryMonitor)
///
/// `Uninitialized -> Probing -> Active | Unavailable`. `Unavailable` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Uninitialized,
    Probing,
    Active,
    Unavailable,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Probing => "probing",
            Self::Active => "active",
            Self::Unavailable => "unavailable",
        };
        f.write_str(name)
    }
}

/// Why a single poll cycle produced no reading
#[derive(Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Execution(#[from] CommandError),

    #[error(transparent)]
    Parse(#[from] ReportParseError),
}

impl CycleError {
    /// Short machine-friendly cause, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Execution(e) => e.kind(),
            Self::Parse(ReportParseError::DeviceIndexOutOfRange { .. }) => "device_out_of_range",
            Self::Parse(_) => "unrecognized_report",
        }
    }
}

/// Monitor-level failures
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The startup probe failed; monitoring stays off for this process
    #[error("GPU memory reporting is unavailable: {0}")]
    ToolUnavailable(#[source] CycleError),

    /// A steady-state cycle failed; the next tick proceeds normally
    #[error("poll cycle failed: {0}")]
    CycleFailed(#[from] CycleError),

    /// The operation is not valid in the current state
    #[error("operation not allowed while monitor is {0}")]
    InvalidState(MonitorState),
}

impl common::MonitorErrorKind for CycleError {}
impl common::MonitorErrorKind for MonitorError {}
