use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::invoker::{AssistantInvoker, Invocation};
use super::signatures::FailureSignatures;
use super::types::TestResult;
use crate::catalog::Prompt;
use crate::style::{StyleClassifier, StyleVerdict};
use crate::tool_event::{extract_stream, truncate_chars, MAX_ERROR_CHARS};

/// Runs one prompt through the assistant and turns whatever happened into a
/// `TestResult`. Never fails: spawn errors, timeouts and stream failures all
/// end up as error strings on the result.
#[derive(Clone)]
pub struct PromptExecutor {
    invoker: Arc<dyn AssistantInvoker>,
    classifier: StyleClassifier,
    signatures: FailureSignatures,
}

impl PromptExecutor {
    pub fn new(
        invoker: Arc<dyn AssistantInvoker>,
        classifier: StyleClassifier,
        signatures: FailureSignatures,
    ) -> Self {
        Self {
            invoker,
            classifier,
            signatures,
        }
    }

    pub async fn execute(&self, prompt: &Prompt, work_dir: &Path, timeout: Duration) -> TestResult {
        let mut result = TestResult::new(prompt);
        let started = Instant::now();

        let invocation = self.invoker.invoke(&prompt.text, work_dir, timeout).await;
        match invocation {
            Ok(Invocation::Completed {
                exit_code,
                stdout,
                stderr,
            }) => {
                result.exit_code = exit_code;
                self.interpret(&mut result, stdout, stderr);
                result.execution_success = exit_code == 0 && result.errors.is_empty();
                result.duration_seconds = started.elapsed().as_secs_f64();
            }
            Ok(Invocation::TimedOut {
                elapsed,
                stdout,
                stderr,
            }) => {
                result.stdout = stdout;
                result.stderr = stderr;
                result.errors = vec![timeout_message(timeout)];
                result.duration_seconds = elapsed.as_secs_f64();
            }
            Err(e) => {
                tracing::warn!(
                    target: "shellbench.runner",
                    prompt_id = %prompt.id,
                    error = %e,
                    "assistant invocation failed"
                );
                result.errors = vec![truncate_chars(&e.to_result_error(), MAX_ERROR_CHARS)];
                result.duration_seconds = started.elapsed().as_secs_f64();
            }
        }

        tracing::info!(
            target: "shellbench.runner",
            prompt_id = %prompt.id,
            success = result.execution_success,
            exit_code = result.exit_code,
            errors = result.errors.len(),
            tool_calls = result.tool_calls.len(),
            bash_style = result.used_bash_style,
            windows_style = result.used_windows_style,
            duration_secs = result.duration_seconds,
            "prompt finished"
        );
        result
    }

    fn interpret(&self, result: &mut TestResult, stdout: String, stderr: String) {
        let extraction = extract_stream(&stdout);
        let mut errors = extraction.errors;

        let stderr_trimmed = stderr.trim();
        if !stderr_trimmed.is_empty() {
            errors.push(format!("stderr: {stderr_trimmed}"));
        }

        let combined = format!("{stdout}\n{stderr}");
        self.signatures.annotate(&combined, &mut errors);

        let mut haystack = stdout.clone();
        for cmd in &extraction.commands_used {
            haystack.push('\n');
            haystack.push_str(cmd);
        }
        let verdict = extraction
            .tool_calls
            .iter()
            .filter_map(|call| call.command())
            .fold(self.classifier.classify(&haystack), |acc, cmd| {
                acc.merge(self.classifier.classify(&cmd))
            });
        apply_verdict(result, verdict);

        result.stdout = stdout;
        result.stderr = stderr;
        result.errors = errors;
        result.commands_used = extraction.commands_used;
        result.tool_calls = extraction.tool_calls;
        result.unattributed_results = extraction.unattributed_results;
    }
}

fn apply_verdict(result: &mut TestResult, verdict: StyleVerdict) {
    result.used_bash_style = verdict.posix;
    result.used_windows_style = verdict.windows;
}

pub(crate) fn timeout_message(timeout: Duration) -> String {
    if timeout.subsec_nanos() == 0 {
        format!("Timeout after {} seconds", timeout.as_secs())
    } else {
        format!("Timeout after {} seconds", timeout.as_secs_f64())
    }
}
