use serde::Serialize;

use crate::format::{format_gigabytes, format_percent};

/// Host facts captured once at startup.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HostSnapshot {
    pub os: String,
    pub arch: String,
    pub logical_cores: usize,
    pub physical_cores: usize,
    pub memory_total: u64,
    pub memory_available: u64,
    pub disk_usage_percent: f32,
}

impl HostSnapshot {
    /// Key/value rows for the system information table.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Operating System", self.os.clone()),
            ("System Architecture", self.arch.clone()),
            ("Processor", self.logical_cores.to_string()),
            ("Physical Cores", self.physical_cores.to_string()),
            ("Total Memory", format_gigabytes(self.memory_total)),
            ("Available Memory", format_gigabytes(self.memory_available)),
            ("Disk Usage", format_percent(self.disk_usage_percent)),
        ]
    }
}

/// Used share of a disk as a percentage, `None` when the capacity is zero.
pub fn disk_usage_percent(total: u64, available: u64) -> Option<f32> {
    if total == 0 {
        return None;
    }
    let used = total.saturating_sub(available);
    Some(((used as f64 / total as f64) * 100.0).clamp(0.0, 100.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> HostSnapshot {
        HostSnapshot {
            os: "Linux".to_string(),
            arch: "x86_64".to_string(),
            logical_cores: 8,
            physical_cores: 4,
            memory_total: 16 * 1024 * 1024 * 1024,
            memory_available: 6 * 1024 * 1024 * 1024,
            disk_usage_percent: 63.5,
        }
    }

    #[test]
    fn rows_are_ordered_and_formatted() {
        let rows = sample_snapshot().rows();
        let keys: Vec<&str> = rows.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "Operating System",
                "System Architecture",
                "Processor",
                "Physical Cores",
                "Total Memory",
                "Available Memory",
                "Disk Usage",
            ]
        );
        assert_eq!(rows[2].1, "8");
        assert_eq!(rows[4].1, "16.00 GB");
        assert_eq!(rows[5].1, "6.00 GB");
        assert_eq!(rows[6].1, "63.5%");
    }

    #[test]
    fn disk_usage_is_bounded() {
        assert_eq!(disk_usage_percent(0, 0), None);
        assert_eq!(disk_usage_percent(100, 25), Some(75.0));
        assert_eq!(disk_usage_percent(100, 100), Some(0.0));
        // available larger than total must not go negative
        assert_eq!(disk_usage_percent(100, 500), Some(0.0));
    }
}
