use std::path::Path;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;

use super::command::{AssistantCommand, OutputMode};
use super::exit::normalize_exit;
use super::invoker::{AssistantInvoker, Invocation};
use crate::error::RunnerError;

/// Runs the real assistant binary as a child process.
#[derive(Debug, Clone)]
pub struct ProcessAssistant {
    command: AssistantCommand,
    mode: OutputMode,
    drain_grace: Duration,
}

impl ProcessAssistant {
    pub fn new(command: AssistantCommand, mode: OutputMode, drain_grace: Duration) -> Self {
        Self {
            command,
            mode,
            drain_grace,
        }
    }

    pub fn command(&self) -> &AssistantCommand {
        &self.command
    }
}

#[async_trait]
impl AssistantInvoker for ProcessAssistant {
    async fn invoke(
        &self,
        prompt: &str,
        work_dir: &Path,
        timeout: Duration,
    ) -> Result<Invocation, RunnerError> {
        let program = self.command.bin.clone();
        let mut cmd = tokio::process::Command::new(&program);
        cmd.args(self.command.args(prompt, self.mode))
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                RunnerError::NotFound {
                    program: program.clone(),
                }
            } else {
                RunnerError::Spawn {
                    program: program.clone(),
                    source,
                }
            }
        })?;
        let started = Instant::now();
        tracing::debug!(
            target: "shellbench.runner",
            program = %program,
            pid = ?child.id(),
            work_dir = %work_dir.display(),
            "assistant started"
        );

        let out_buf = Capture::default();
        let err_buf = Capture::default();
        let out_task = child
            .stdout
            .take()
            .map(|s| pump("stdout", s, out_buf.clone()));
        let err_task = child
            .stderr
            .take()
            .map(|s| pump("stderr", s, err_buf.clone()));

        let waited = tokio::time::timeout(timeout, child.wait()).await;
        match waited {
            Ok(status) => {
                let status = status.map_err(RunnerError::Wait)?;
                // A background process started by the assistant can inherit the
                // pipes and hold them open long after the child itself exited.
                let deadline = tokio::time::Instant::now() + self.drain_grace;
                let out_closed = finish_pump(out_task, deadline).await?;
                let err_closed = finish_pump(err_task, deadline).await?;
                if !(out_closed && err_closed) {
                    tracing::warn!(
                        target: "shellbench.runner",
                        program = %program,
                        grace_ms = self.drain_grace.as_millis() as u64,
                        "output pipes still open after assistant exited, keeping what was read"
                    );
                }
                Ok(Invocation::Completed {
                    exit_code: normalize_exit(status),
                    stdout: out_buf.to_string_lossy(),
                    stderr: err_buf.to_string_lossy(),
                })
            }
            Err(_) => {
                let elapsed = started.elapsed();
                tracing::warn!(
                    target: "shellbench.runner",
                    program = %program,
                    timeout_secs = timeout.as_secs_f64(),
                    "assistant timed out, killing"
                );
                if let Err(e) = child.kill().await {
                    tracing::warn!(target: "shellbench.runner", error = %e, "failed to kill assistant");
                }
                let deadline = tokio::time::Instant::now() + self.drain_grace;
                drain(out_task, deadline).await;
                drain(err_task, deadline).await;
                Ok(Invocation::TimedOut {
                    elapsed,
                    stdout: out_buf.to_string_lossy(),
                    stderr: err_buf.to_string_lossy(),
                })
            }
        }
    }
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn push(&self, chunk: &[u8]) {
        let mut guard = self.0.lock().unwrap_or_else(|e| e.into_inner());
        guard.extend_from_slice(chunk);
    }

    fn to_string_lossy(&self) -> String {
        let guard = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&guard).into_owned()
    }
}

type PumpHandle = JoinHandle<Result<(), RunnerError>>;

fn pump<R>(stream: &'static str, mut reader: R, buf: Capture) -> PumpHandle
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut chunk = [0u8; 8192];
        loop {
            let n = reader
                .read(&mut chunk)
                .await
                .map_err(|source| RunnerError::StreamIo { stream, source })?;
            if n == 0 {
                return Ok(());
            }
            buf.push(&chunk[..n]);
        }
    })
}

/// Joins a pump, giving up at `deadline`. Returns `false` when the stream was
/// still open and the pump had to be aborted.
async fn finish_pump(
    task: Option<PumpHandle>,
    deadline: tokio::time::Instant,
) -> Result<bool, RunnerError> {
    let Some(mut task) = task else {
        return Ok(true);
    };
    match tokio::time::timeout_at(deadline, &mut task).await {
        Ok(Ok(res)) => res.map(|()| true),
        Ok(Err(e)) => Err(RunnerError::StreamIo {
            stream: "pump",
            source: std::io::Error::other(e.to_string()),
        }),
        Err(_) => {
            task.abort();
            Ok(false)
        }
    }
}

/// Waits until `deadline` for a pump to hit EOF; whatever it read so far stays in its buffer.
async fn drain(task: Option<PumpHandle>, deadline: tokio::time::Instant) {
    let Some(mut task) = task else {
        return;
    };
    if tokio::time::timeout_at(deadline, &mut task).await.is_err() {
        task.abort();
    }
}
