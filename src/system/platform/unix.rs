use std::io;
use std::path::PathBuf;

use super::PlatformExtensions;
use crate::error::ProcessError;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn request_termination(pid: u32) -> Result<(), ProcessError> {
        // 0 addresses our own process group and values above i32::MAX would
        // wrap into negative (group) targets.
        let raw = match libc::pid_t::try_from(pid) {
            Ok(raw) if raw > 0 => raw,
            _ => return Err(ProcessError::NotFound { pid }),
        };

        // SAFETY: kill(2) takes plain integers and has no memory-safety preconditions.
        let rc = unsafe { libc::kill(raw, libc::SIGTERM) };
        if rc == 0 {
            return Ok(());
        }

        let err = io::Error::last_os_error();
        Err(match err.raw_os_error() {
            Some(libc::ESRCH) => ProcessError::NotFound { pid },
            Some(libc::EPERM) => ProcessError::AccessDenied { pid },
            _ => ProcessError::Os { pid, source: err },
        })
    }

    fn system_mount_point() -> PathBuf {
        PathBuf::from("/")
    }
}
