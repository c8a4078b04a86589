use std::path::PathBuf;

use crate::error::ProcessError;

pub trait PlatformExtensions {
    /// Sends a graceful termination request. Does not wait for the exit.
    fn request_termination(pid: u32) -> Result<(), ProcessError>;
    /// Mount point whose disk usage describes the host.
    fn system_mount_point() -> PathBuf;
}

#[cfg(unix)]
mod unix;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(unix)]
use unix as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn request_termination(pid: u32) -> Result<(), ProcessError> {
    platform_impl::Platform::request_termination(pid)
}

pub fn system_mount_point() -> PathBuf {
    platform_impl::Platform::system_mount_point()
}
