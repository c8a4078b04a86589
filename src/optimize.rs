use std::collections::HashSet;

use serde::Serialize;

use crate::error::ProcessError;
use crate::system::process::ProcessRecord;

pub const DEFAULT_TARGET_BYTES: u64 = 200 * 1024 * 1024;
pub const DEFAULT_PROTECTED_NAME: &str = "System";

/// Anything that can ask the OS to end a process.
pub trait Terminate {
    fn terminate(&mut self, pid: u32) -> Result<(), ProcessError>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OptimizationResult {
    pub freed_bytes: u64,
    /// Pids in the order they were terminated.
    pub terminated: Vec<u32>,
    pub failed: usize,
}

/// Terminates unprotected processes, largest resident memory first, until
/// `target_bytes` have been freed or no candidates remain.
///
/// Ties in memory keep the order of `processes`. Freed bytes are the
/// resident sizes recorded at enumeration time. A failed termination is
/// counted and skipped; it never aborts the run.
pub fn optimize<T: Terminate + ?Sized>(
    terminator: &mut T,
    processes: impl IntoIterator<Item = ProcessRecord>,
    protected_names: &HashSet<String>,
    target_bytes: u64,
) -> OptimizationResult {
    let _span = tracing::debug_span!("optimize", target_bytes).entered();

    let mut candidates: Vec<ProcessRecord> = processes.into_iter().collect();
    candidates.sort_by(|a, b| b.memory_bytes.cmp(&a.memory_bytes));

    let mut result = OptimizationResult::default();
    let mut attempted: HashSet<u32> = HashSet::new();

    for candidate in candidates {
        if result.freed_bytes >= target_bytes {
            break;
        }
        if protected_names.contains(&candidate.name) {
            continue;
        }
        if !attempted.insert(candidate.pid) {
            continue;
        }

        match terminator.terminate(candidate.pid) {
            Ok(()) => {
                result.freed_bytes = result.freed_bytes.saturating_add(candidate.memory_bytes);
                result.terminated.push(candidate.pid);
            }
            Err(err) => {
                tracing::debug!(pid = err.pid(), name = %candidate.name, %err, "skipping candidate");
                result.failed += 1;
            }
        }
    }

    tracing::info!(
        freed_bytes = result.freed_bytes,
        terminated = result.terminated.len(),
        failed = result.failed,
        "optimization finished"
    );
    result
}

/// Protected set: configured names plus, optionally, the running program.
pub fn protected_set<I, S>(names: I, self_name: Option<String>) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut set: HashSet<String> = names.into_iter().map(Into::into).collect();
    if let Some(name) = self_name {
        set.insert(name);
    }
    set
}
