//! Report parser
//!
//! Layout assumptions for `nvidia-smi -q -d MEMORY` output live in the
//! constants below and nowhere else.

use super::types::{DeviceIndex, MemoryReading, ReportParseError};

/// Line separating device sections; the text before the first one is preamble
pub const DEVICE_SECTION_DELIMITER: &str = "==============\n";

/// Line introducing the framebuffer memory block inside a device section
pub const MEMORY_SECTION_HEADER: &str = "FB Memory Usage\n";

/// Label of the used-memory field
pub const USED_LABEL: &str = "Used";

/// Label of the free-memory field
pub const FREE_LABEL: &str = "Free";

/// Extract the memory reading for `device` from a raw report
pub fn parse_report(report: &str, device: DeviceIndex) -> Result<MemoryReading, ReportParseError> {
    let section = device_section(report, device)?;

    let (_, memory_block) = section
        .split_once(MEMORY_SECTION_HEADER)
        .ok_or(ReportParseError::MemorySectionMissing { index: device })?;

    let used_mb = extract_field(memory_block, USED_LABEL)?;
    let free_mb = extract_field(memory_block, FREE_LABEL)?;

    Ok(MemoryReading::new(used_mb, free_mb))
}

/// Number of device sections in a report
pub fn device_count(report: &str) -> usize {
    device_sections(report).len()
}

fn device_sections(report: &str) -> Vec<&str> {
    let mut sections: Vec<&str> = report.split(DEVICE_SECTION_DELIMITER).skip(1).collect();
    // A delimiter at the very end of the report does not open a device section
    if sections.last().is_some_and(|s| s.is_empty()) {
        sections.pop();
    }
    sections
}

fn device_section(report: &str, device: DeviceIndex) -> Result<&str, ReportParseError> {
    let sections = device_sections(report);
    sections
        .get(device.get())
        .copied()
        .ok_or(ReportParseError::DeviceIndexOutOfRange {
            index: device,
            available: sections.len(),
        })
}

/// First `<label> : <digits>` line in `block`, column positions ignored
fn extract_field(block: &str, label: &'static str) -> Result<u64, ReportParseError> {
    let digits = block
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim() != label {
                return None;
            }
            let value = value.trim_start();
            let end = value
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(value.len());
            (end > 0).then(|| &value[..end])
        })
        .ok_or(ReportParseError::FieldMissing { field: label })?;

    digits
        .parse::<u64>()
        .map_err(|_| ReportParseError::InvalidValue {
            field: label,
            value: digits.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_field_ignores_similar_labels() {
        let block = "Reserved : 5 MiB\nUsed GPU : 6 MiB\nUsed : 7 MiB\n";
        assert_eq!(extract_field(block, USED_LABEL).unwrap(), 7);
    }

    #[test]
    fn test_extract_field_skips_non_numeric_value() {
        let block = "Used : N/A\nUsed : 12 MiB\n";
        assert_eq!(extract_field(block, USED_LABEL).unwrap(), 12);
    }

    #[test]
    fn test_extract_field_without_number_is_missing() {
        let block = "Used : N/A\n";
        assert_eq!(
            extract_field(block, USED_LABEL),
            Err(ReportParseError::FieldMissing { field: "Used" })
        );
    }

    #[test]
    fn test_extract_field_overflow() {
        let block = "Free : 99999999999999999999999 MiB\n";
        assert_eq!(
            extract_field(block, FREE_LABEL),
            Err(ReportParseError::InvalidValue {
                field: "Free",
                value: "99999999999999999999999".to_string(),
            })
        );
    }

    #[test]
    fn test_trailing_delimiter_is_not_a_device() {
        let report = "pre\n==============\nFB Memory Usage\nUsed : 1 MiB\nFree : 2 MiB\n==============\n";
        assert_eq!(device_count(report), 1);
    }

    #[test]
    fn test_report_without_delimiter_has_no_devices() {
        assert_eq!(device_count("No devices were found\n"), 0);
        assert_eq!(device_count(""), 0);
    }
}
