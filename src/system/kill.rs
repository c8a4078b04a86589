use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use super::platform;
use crate::error::ProcessError;

/// Re-checks that `pid` is still alive, then asks the OS to terminate it.
/// Returns as soon as the request is delivered.
pub fn terminate_process(sys: &mut System, pid: u32) -> Result<(), ProcessError> {
    let sysinfo_pid = Pid::from_u32(pid);
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[sysinfo_pid]),
        true,
        ProcessRefreshKind::nothing(),
    );
    if sys.process(sysinfo_pid).is_none() {
        return Err(ProcessError::NotFound { pid });
    }
    platform::request_termination(pid)
}
