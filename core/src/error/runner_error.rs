// core/src/error/runner_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("assistant binary not found: {program}")]
    NotFound { program: String },

    #[error("failed to spawn process: {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error while streaming: {stream}")]
    StreamIo {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for process")]
    Wait(#[source] std::io::Error),

    #[error("failed to prepare working directory: {path}")]
    WorkDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RunnerError {
    /// Converts the failure into the single error entry stored on a test result.
    pub fn to_result_error(&self) -> String {
        match self {
            RunnerError::NotFound { program } => format!("Assistant binary not found: {program}"),
            RunnerError::Spawn { source, .. } | RunnerError::WorkDir { source, .. } => {
                format!("OS error: {source}")
            }
            RunnerError::Wait(source) => format!("OS error: {source}"),
            RunnerError::StreamIo { stream, source } => {
                format!("Communication error: {stream}: {source}")
            }
        }
    }
}
