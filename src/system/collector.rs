use sysinfo::{
    CpuRefreshKind, Disks, Pid, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System,
    ThreadKind,
};

use super::kill::terminate_process;
use super::platform;
use super::process::ProcessRecord;
use super::snapshot::{HostSnapshot, disk_usage_percent};
use crate::error::{ProcessError, QueryError};
use crate::optimize::Terminate;

/// Owns the `sysinfo` handle used for host facts, enumeration and
/// termination. The resource sampler keeps its own.
pub struct Collector {
    sys: System,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        Collector { sys }
    }

    pub fn capture_snapshot(&mut self) -> Result<HostSnapshot, QueryError> {
        let _span = tracing::debug_span!("collector.capture_snapshot").entered();

        self.sys.refresh_memory();
        self.sys.refresh_cpu_list(CpuRefreshKind::nothing());

        let logical_cores = self.sys.cpus().len();
        if logical_cores == 0 {
            return Err(QueryError::Unavailable("processor information"));
        }
        let memory_total = self.sys.total_memory();
        if memory_total == 0 {
            return Err(QueryError::Unavailable("memory information"));
        }

        let os = match (System::name(), System::os_version()) {
            (Some(name), Some(version)) => format!("{name} {version}"),
            (Some(name), None) => name,
            _ => std::env::consts::OS.to_string(),
        };

        Ok(HostSnapshot {
            os,
            arch: std::env::consts::ARCH.to_string(),
            logical_cores,
            physical_cores: System::physical_core_count().unwrap_or(logical_cores),
            memory_total,
            memory_available: self.sys.available_memory().min(memory_total),
            disk_usage_percent: system_disk_usage()?,
        })
    }

    /// Refreshes the process table and yields one record per live process in
    /// ascending pid order. Entries that vanish or cannot be read are skipped.
    pub fn list_processes(&mut self) -> impl Iterator<Item = ProcessRecord> + '_ {
        let _span = tracing::debug_span!("collector.refresh").entered();

        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );

        let mut pids: Vec<Pid> = self.sys.processes().keys().copied().collect();
        pids.sort_unstable();

        let sys = &self.sys;
        pids.into_iter().filter_map(move |pid| {
            let process = sys.process(pid)?;
            // Linux tasks show up alongside their owning process.
            if matches!(process.thread_kind(), Some(ThreadKind::Userland)) {
                return None;
            }
            if matches!(process.status(), ProcessStatus::Zombie) {
                return None;
            }
            Some(ProcessRecord::new(
                pid.as_u32(),
                process.name().to_string_lossy(),
                process.memory(),
            ))
        })
    }

    pub fn terminate(&mut self, pid: u32) -> Result<(), ProcessError> {
        terminate_process(&mut self.sys, pid)?;
        tracing::info!(pid, "termination requested");
        Ok(())
    }

    /// Display name of the running program, as enumeration reports it.
    pub fn self_process_name(&mut self) -> Option<String> {
        let pid = sysinfo::get_current_pid().ok()?;
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            false,
            ProcessRefreshKind::nothing(),
        );
        self.sys
            .process(pid)
            .map(|p| p.name().to_string_lossy().into_owned())
    }
}

impl Terminate for Collector {
    fn terminate(&mut self, pid: u32) -> Result<(), ProcessError> {
        Collector::terminate(self, pid)
    }
}

/// Usage of the disk mounted at the system mount point, or of the largest
/// disk when nothing is mounted there.
fn system_disk_usage() -> Result<f32, QueryError> {
    let disks = Disks::new_with_refreshed_list();
    let mount = platform::system_mount_point();
    let disk = disks
        .list()
        .iter()
        .find(|d| d.mount_point() == mount.as_path())
        .or_else(|| disks.list().iter().max_by_key(|d| d.total_space()))
        .ok_or(QueryError::Unavailable("disk usage"))?;
    disk_usage_percent(disk.total_space(), disk.available_space())
        .ok_or(QueryError::Unavailable("disk usage"))
}
