use std::thread;
use std::time::Duration;

use sysinfo::{
    CpuRefreshKind, MINIMUM_CPU_UPDATE_INTERVAL, MemoryRefreshKind, RefreshKind, System,
};

use super::sample::ResourceSample;
use crate::error::QueryError;

pub const DEFAULT_MEASUREMENT_WINDOW: Duration = Duration::from_secs(1);

/// Measures global CPU and memory utilization. Not self-scheduling: the
/// caller decides when the next `sample` runs.
pub struct Sampler {
    sys: System,
    window: Duration,
}

impl Sampler {
    pub fn new(window: Duration) -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
                .with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        Sampler {
            sys,
            window: window.max(MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Blocks for the measurement window and returns CPU usage averaged over
    /// it, plus the memory usage read at the end.
    pub fn sample(&mut self) -> Result<ResourceSample, QueryError> {
        let _span = tracing::debug_span!("sampler.sample").entered();

        self.sys.refresh_cpu_usage();
        thread::sleep(self.window);
        self.sys.refresh_cpu_usage();
        self.sys
            .refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());

        if self.sys.cpus().is_empty() {
            return Err(QueryError::Unavailable("cpu usage"));
        }

        ResourceSample::from_raw(
            self.sys.global_cpu_usage(),
            self.sys.used_memory(),
            self.sys.total_memory(),
        )
    }
}
