//! Metric names and recording helpers
//!
//! Recording is a no-op unless a recorder (the Prometheus exporter) is installed.

use crate::report::{DeviceIndex, MemoryReading};
use metrics::{counter, gauge};

pub const GPU_MEMORY_USED_MB: &str = "gpu_memory_used_mb";
pub const GPU_MEMORY_FREE_MB: &str = "gpu_memory_free_mb";
pub const GPU_MEMORY_TOTAL_MB: &str = "gpu_memory_total_mb";
pub const CYCLE_FAILURES_TOTAL: &str = "gpu_monitor_cycle_failures_total";

pub fn record_reading(device: DeviceIndex, reading: &MemoryReading) {
    let device = device.to_string();
    gauge!(GPU_MEMORY_USED_MB, "device" => device.clone()).set(reading.used_mb() as f64);
    gauge!(GPU_MEMORY_FREE_MB, "device" => device.clone()).set(reading.free_mb() as f64);
    gauge!(GPU_MEMORY_TOTAL_MB, "device" => device).set(reading.total_mb() as f64);
}

pub fn record_cycle_failure(device: DeviceIndex, cause: &'static str) {
    counter!(CYCLE_FAILURES_TOTAL, "device" => device.to_string(), "cause" => cause).increment(1);
}
