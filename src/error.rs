use thiserror::Error;

/// An OS metric could not be read.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{0} is unavailable on this host")]
    Unavailable(&'static str),

    #[error("{metric} reported an invalid value ({value})")]
    InvalidValue { metric: &'static str, value: f64 },
}

/// Failure to act on a single process. None of these abort a batch.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("process {pid} not found (it may have already exited)")]
    NotFound { pid: u32 },

    #[error("access denied to process {pid}")]
    AccessDenied { pid: u32 },

    #[error("failed to terminate process {pid}: {source}")]
    Os {
        pid: u32,
        #[source]
        source: std::io::Error,
    },
}

impl ProcessError {
    pub fn pid(&self) -> u32 {
        match self {
            ProcessError::NotFound { pid }
            | ProcessError::AccessDenied { pid }
            | ProcessError::Os { pid, .. } => *pid,
        }
    }
}
