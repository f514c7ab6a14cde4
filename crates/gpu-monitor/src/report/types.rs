//! Report data types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Index of a device section within a multi-device report (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceIndex(usize);

impl DeviceIndex {
    /// The device monitored by default
    pub const PRIMARY: Self = Self(0);

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for DeviceIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for DeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Framebuffer memory usage of one device at sample time, in whole MiB
///
/// Only the report parser constructs readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryReading {
    used_mb: u64,
    free_mb: u64,
}

impl MemoryReading {
    pub(crate) fn new(used_mb: u64, free_mb: u64) -> Self {
        Self { used_mb, free_mb }
    }

    pub fn used_mb(&self) -> u64 {
        self.used_mb
    }

    pub fn free_mb(&self) -> u64 {
        self.free_mb
    }

    /// Addressable memory: used plus free
    pub fn total_mb(&self) -> u64 {
        self.used_mb.saturating_add(self.free_mb)
    }

    /// Percentage of addressable memory in use, 0.0 when the device reports none
    pub fn usage_percent(&self) -> f64 {
        match self.total_mb() {
            0 => 0.0,
            total => self.used_mb as f64 / total as f64 * 100.0,
        }
    }

    /// Status line text, e.g. `(cuda:0) 1024 / 3072 MB`
    pub fn status_text(&self, device: DeviceIndex) -> String {
        format!(
            "(cuda:{}) {} / {} MB",
            device,
            self.used_mb,
            self.total_mb()
        )
    }
}

/// Structural failures while reading a report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportParseError {
    /// No section exists for the requested device
    #[error("GPU index {index} is out of range: report lists {available} device section(s)")]
    DeviceIndexOutOfRange {
        index: DeviceIndex,
        available: usize,
    },

    /// The device section has no framebuffer memory block
    #[error("report section for GPU {index} has no `FB Memory Usage` block")]
    MemorySectionMissing { index: DeviceIndex },

    /// A required field line is absent or carries no number
    #[error("memory block has no `{field}` value")]
    FieldMissing { field: &'static str },

    /// The digit run does not fit in a 64-bit counter
    #[error("`{field}` value {value} is not a valid MiB count")]
    InvalidValue { field: &'static str, value: String },
}

impl ReportParseError {
    /// True when the report layout itself is unrecognized (tool version drift),
    /// false when the layout is fine but the device does not exist.
    pub fn is_format_drift(&self) -> bool {
        !matches!(self, Self::DeviceIndexOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_format() {
        let reading = MemoryReading::new(1024, 2048);
        assert_eq!(
            reading.status_text(DeviceIndex::PRIMARY),
            "(cuda:0) 1024 / 3072 MB"
        );
        assert_eq!(
            reading.status_text(DeviceIndex::new(3)),
            "(cuda:3) 1024 / 3072 MB"
        );
    }

    #[test]
    fn test_total_saturates() {
        let reading = MemoryReading::new(u64::MAX, 1);
        assert_eq!(reading.total_mb(), u64::MAX);
    }

    #[test]
    fn test_usage_percent() {
        assert_eq!(MemoryReading::new(0, 0).usage_percent(), 0.0);
        assert_eq!(MemoryReading::new(256, 768).usage_percent(), 25.0);
    }

    #[test]
    fn test_format_drift_classification() {
        let out_of_range = ReportParseError::DeviceIndexOutOfRange {
            index: DeviceIndex::new(2),
            available: 1,
        };
        assert!(!out_of_range.is_format_drift());
        assert!(ReportParseError::MemorySectionMissing {
            index: DeviceIndex::PRIMARY
        }
        .is_format_drift());
        assert!(ReportParseError::FieldMissing { field: "Used" }.is_format_drift());
    }

    #[test]
    fn test_reading_serializes_field_names() {
        let json = serde_json::to_value(MemoryReading::new(1, 2)).unwrap();
        assert_eq!(json, serde_json::json!({ "used_mb": 1, "free_mb": 2 }));
    }

    #[test]
    fn test_reading_deserializes_from_json() {
        let reading: MemoryReading =
            serde_json::from_str(r#"{ "used_mb": 512, "free_mb": 1536 }"#).unwrap();
        assert_eq!(reading, MemoryReading::new(512, 1536));
        assert_eq!(reading.total_mb(), 2048);
    }
}
