//! Configuration for the GPU monitor
//!
//! The polling period and monitored device are fixed by the monitor itself;
//! only the plumbing around it (command, display, logging, metrics) is
//! configurable.

pub mod types;
pub mod validation;

pub use types::*;
