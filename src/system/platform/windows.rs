use std::io;
use std::path::PathBuf;

use super::PlatformExtensions;
use crate::error::ProcessError;

use windows_sys::Win32::{
    Foundation::{CloseHandle, ERROR_ACCESS_DENIED, ERROR_INVALID_PARAMETER, GetLastError},
    System::Threading::{OpenProcess, PROCESS_TERMINATE, TerminateProcess},
};

pub struct Platform;

fn classify(pid: u32, code: u32) -> ProcessError {
    match code {
        ERROR_ACCESS_DENIED => ProcessError::AccessDenied { pid },
        // OpenProcess reports a pid that no longer exists as an invalid parameter
        ERROR_INVALID_PARAMETER => ProcessError::NotFound { pid },
        _ => ProcessError::Os {
            pid,
            source: io::Error::from_raw_os_error(code as i32),
        },
    }
}

impl PlatformExtensions for Platform {
    fn request_termination(pid: u32) -> Result<(), ProcessError> {
        if pid == 0 {
            return Err(ProcessError::NotFound { pid });
        }
        unsafe {
            let handle = OpenProcess(PROCESS_TERMINATE, 0, pid);
            if handle.is_null() {
                return Err(classify(pid, GetLastError()));
            }
            let ok = TerminateProcess(handle, 1);
            let code = if ok == 0 { Some(GetLastError()) } else { None };
            CloseHandle(handle);
            match code {
                None => Ok(()),
                Some(code) => Err(classify(pid, code)),
            }
        }
    }

    fn system_mount_point() -> PathBuf {
        let drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
        PathBuf::from(format!("{drive}\\"))
    }
}
