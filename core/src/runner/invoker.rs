use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::RunnerError;

/// Outcome of one assistant invocation, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Completed {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
    /// The child outlived its timeout and was killed; output is whatever was
    /// drained during the grace period.
    TimedOut {
        elapsed: Duration,
        stdout: String,
        stderr: String,
    },
}

/// Seam between the executor and the external assistant process.
#[async_trait]
pub trait AssistantInvoker: Send + Sync {
    async fn invoke(
        &self,
        prompt: &str,
        work_dir: &Path,
        timeout: Duration,
    ) -> Result<Invocation, RunnerError>;
}
