use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;

use super::events::{SuiteEvent, ERROR_SNIPPET_CHARS};
use super::types::{RunConfig, TestRun};
use crate::catalog::Prompt;
use crate::error::RunnerError;
use crate::runner::PromptExecutor;
use crate::tool_event::truncate_chars;

pub const WORKDIR_NAME: &str = "workdir";

/// Drives a batch of prompts through the executor, strictly one at a time.
///
/// All prompts share one scratch directory. The assistant may hold locks on it
/// and on its own integration settings, so prompts never overlap.
pub struct SuiteRunner {
    executor: PromptExecutor,
    work_dir: PathBuf,
    timeout: Duration,
    events: Option<mpsc::UnboundedSender<SuiteEvent>>,
}

impl SuiteRunner {
    pub fn new(executor: PromptExecutor, work_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            executor,
            work_dir: work_dir.into(),
            timeout,
            events: None,
        }
    }

    /// Scratch directory under a results directory.
    pub fn work_dir_for(results_dir: &Path) -> PathBuf {
        results_dir.join(WORKDIR_NAME)
    }

    pub fn with_events(mut self, tx: mpsc::UnboundedSender<SuiteEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Only a scratch directory that cannot be created fails the batch;
    /// every per-prompt failure is recorded on its result.
    pub async fn run_batch(&self, prompts: &[Prompt], cfg: &RunConfig) -> Result<TestRun, RunnerError> {
        tokio::fs::create_dir_all(&self.work_dir)
            .await
            .map_err(|source| RunnerError::WorkDir {
                path: self.work_dir.display().to_string(),
                source,
            })?;

        let total = prompts.len();
        let mut run = TestRun::new(cfg);
        tracing::info!(
            target: "shellbench.suite",
            total,
            mcp_enabled = cfg.mcp_enabled,
            mcp_server = cfg.mcp_server.as_deref().unwrap_or(""),
            work_dir = %self.work_dir.display(),
            "run started"
        );
        self.emit(SuiteEvent::RunStarted {
            total,
            mcp_enabled: cfg.mcp_enabled,
        });

        for (i, prompt) in prompts.iter().enumerate() {
            let index = i + 1;
            self.emit(SuiteEvent::PromptStarted {
                index,
                total,
                prompt_id: prompt.id.clone(),
                category: prompt.category.clone(),
            });

            let result = self.executor.execute(prompt, &self.work_dir, self.timeout).await;

            self.emit(SuiteEvent::PromptFinished {
                index,
                total,
                prompt_id: result.prompt_id.clone(),
                success: result.execution_success,
                duration: Duration::from_secs_f64(result.duration_seconds.max(0.0)),
                first_error: result
                    .first_error()
                    .map(|e| truncate_chars(e, ERROR_SNIPPET_CHARS)),
            });
            run.record(result);
        }

        if let Err(e) = run.verify_counts() {
            tracing::error!(target: "shellbench.suite", error = %e, "run counters inconsistent");
        }
        tracing::info!(
            target: "shellbench.suite",
            total = run.total_prompts,
            successful = run.successful_prompts,
            failed = run.failed_prompts,
            bash_style = run.bash_style_count,
            windows_style = run.windows_style_count,
            "run finished"
        );
        self.emit(SuiteEvent::RunFinished {
            total: run.total_prompts,
            successful: run.successful_prompts,
            failed: run.failed_prompts,
        });
        Ok(run)
    }

    fn emit(&self, event: SuiteEvent) {
        if let Some(tx) = &self.events {
            // Receiver gone means nobody is rendering progress; keep running.
            let _ = tx.send(event);
        }
    }
}
