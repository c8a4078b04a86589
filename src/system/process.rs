use serde::Serialize;

use crate::format::format_megabytes;

/// One process as seen by a single enumeration pass. Stale as soon as it
/// is captured: the pid may be reused and the footprint may change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub memory_bytes: u64,
}

impl ProcessRecord {
    pub fn new(pid: u32, name: impl Into<String>, memory_bytes: u64) -> Self {
        Self {
            pid,
            name: name.into(),
            memory_bytes,
        }
    }

    /// Cells for the process table: name, pid, memory in megabytes.
    pub fn table_row(&self) -> [String; 3] {
        [
            self.name.clone(),
            self.pid.to_string(),
            format_megabytes(self.memory_bytes),
        ]
    }
}

/// Largest `n` records by resident memory, ties in input order.
pub fn top_by_memory(records: &[ProcessRecord], n: usize) -> Vec<ProcessRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.memory_bytes.cmp(&a.memory_bytes));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_row_formats_memory_in_megabytes() {
        let record = ProcessRecord::new(314, "firefox", 150 * 1024 * 1024);
        assert_eq!(
            record.table_row(),
            [
                "firefox".to_string(),
                "314".to_string(),
                "150.00 MB".to_string()
            ]
        );
    }

    #[test]
    fn top_by_memory_keeps_input_order_for_ties() {
        let records = vec![
            ProcessRecord::new(1, "a", 10),
            ProcessRecord::new(2, "b", 30),
            ProcessRecord::new(3, "c", 10),
            ProcessRecord::new(4, "d", 20),
        ];
        let top: Vec<u32> = top_by_memory(&records, 3).iter().map(|r| r.pid).collect();
        assert_eq!(top, vec![2, 4, 1]);
    }
}
