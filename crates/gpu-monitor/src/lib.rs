//! GPU Monitor Library
//!
//! Live GPU framebuffer memory readings from `nvidia-smi -q -d MEMORY`,
//! polled on a fixed interval and rendered as a one-line status display.
//!
//! - [`report`]: pure parser for the textual report
//! - [`command`]: running the diagnostic command with a timeout
//! - [`monitor`]: probe and polling state machine
//! - [`display`]: status line renderers

pub mod cli;
pub mod command;
pub mod config;
pub mod display;
pub mod monitor;
pub mod report;

pub use config::MonitorConfig;
pub use monitor::{MemoryMonitor, MonitorError, MonitorHandle, MonitorState, POLL_INTERVAL};
pub use report::{parse_report, DeviceIndex, MemoryReading, ReportParseError};
