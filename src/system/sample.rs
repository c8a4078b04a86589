use serde::Serialize;

use crate::error::QueryError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResourceSample {
    pub cpu_percent: f32,
    pub memory_percent: f32,
}

impl ResourceSample {
    /// Validates raw readings. Non-finite CPU or zero total memory is an
    /// error; otherwise values are clamped to [0, 100].
    pub fn from_raw(
        cpu_percent: f32,
        memory_used: u64,
        memory_total: u64,
    ) -> Result<Self, QueryError> {
        if !cpu_percent.is_finite() {
            return Err(QueryError::InvalidValue {
                metric: "cpu usage",
                value: f64::from(cpu_percent),
            });
        }
        if memory_total == 0 {
            return Err(QueryError::Unavailable("memory usage"));
        }
        let memory_percent = (memory_used as f64 / memory_total as f64) * 100.0;
        Ok(Self {
            cpu_percent: cpu_percent.clamp(0.0, 100.0),
            memory_percent: memory_percent.clamp(0.0, 100.0) as f32,
        })
    }
}
