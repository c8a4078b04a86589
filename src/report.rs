use std::fmt::Write;

use serde::Serialize;

use crate::error::QueryError;
use crate::format::{format_megabytes, format_percent};
use crate::system::collector::Collector;
use crate::system::process::{ProcessRecord, top_by_memory};
use crate::system::sample::ResourceSample;
use crate::system::sampler::Sampler;
use crate::system::snapshot::HostSnapshot;

/// One-shot, non-interactive view of the host.
#[derive(Debug, Serialize)]
pub struct Report {
    pub snapshot: Option<HostSnapshot>,
    pub sample: Option<ResourceSample>,
    pub top_processes: Vec<ProcessRecord>,
    pub errors: Vec<String>,
}

impl Report {
    pub fn collect(collector: &mut Collector, sampler: &mut Sampler, top: usize) -> Self {
        let mut errors = Vec::new();

        let snapshot = record_err(collector.capture_snapshot(), "system information", &mut errors);
        let sample = record_err(sampler.sample(), "resource usage", &mut errors);
        let processes: Vec<ProcessRecord> = collector.list_processes().collect();

        Report {
            snapshot,
            sample,
            top_processes: top_by_memory(&processes, top),
            errors,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "System Information");
        if let Some(snapshot) = &self.snapshot {
            for (key, value) in snapshot.rows() {
                let _ = writeln!(out, "  {key:<20} {value}");
            }
        }

        let _ = writeln!(out, "\nResource Monitor");
        if let Some(sample) = &self.sample {
            let _ = writeln!(out, "  CPU Usage: {}", format_percent(sample.cpu_percent));
            let _ = writeln!(out, "  Memory Usage: {}", format_percent(sample.memory_percent));
        }

        let _ = writeln!(out, "\nTop Processes");
        let _ = writeln!(out, "  {:<24} {:>8} {:>12}", "Process", "PID", "Memory");
        for process in &self.top_processes {
            let _ = writeln!(
                out,
                "  {:<24} {:>8} {:>12}",
                process.name,
                process.pid,
                format_megabytes(process.memory_bytes)
            );
        }

        for error in &self.errors {
            let _ = writeln!(out, "\nerror: {error}");
        }
        out
    }
}

fn record_err<T>(
    result: Result<T, QueryError>,
    what: &str,
    errors: &mut Vec<String>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(format!("Failed to get {what}: {err}"));
            None
        }
    }
}
