use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;

use super::summary::summarize_run;
use super::types::{RunPair, RunSummary};
use crate::config::ReportConfig;
use crate::error::CompareError;
use crate::runner::{AssistantInvoker, Invocation};

pub const REPORT_FILE: &str = "final-report.md";
pub const REPORT_TITLE: &str = "# Shell Benchmark Report";

const ASSESSMENT_TEMPLATE: &str = "\
You are reviewing results from a benchmark of an AI coding assistant on Windows.
The same prompts were run twice: once with only the default POSIX-emulating shell
tool, and once with a native PowerShell integration available.

## Results without the integration
```json
{without}
```

## Results with the integration
```json
{with}
```

Write a Markdown report covering: a short executive summary; success rates and
POSIX-style versus Windows-style command usage for both runs; which prompts failed
without the integration and why; concrete examples of commands that changed between
runs; whether the integration is worth installing and any caveats.
";

pub fn assessment_prompt(without: &RunSummary, with: &RunSummary) -> Result<String, serde_json::Error> {
    Ok(ASSESSMENT_TEMPLATE
        .replace("{without}", &serde_json::to_string_pretty(without)?)
        .replace("{with}", &serde_json::to_string_pretty(with)?))
}

/// Hands both run summaries to the assistant and stores its reply verbatim
/// under a title and timestamp. Returns the report path.
pub async fn assess(
    pair: &RunPair,
    invoker: &dyn AssistantInvoker,
    work_dir: &Path,
    cfg: &ReportConfig,
    output: &Path,
) -> Result<PathBuf, CompareError> {
    let without = summarize_run(&pair.without_mcp, cfg);
    let with = summarize_run(&pair.with_mcp, cfg);
    let prompt = assessment_prompt(&without, &with).map_err(CompareError::Encode)?;

    tracing::info!(
        target: "shellbench.compare",
        prompt_chars = prompt.len(),
        timeout_secs = cfg.timeout_secs,
        "running assessment"
    );
    let invocation = invoker
        .invoke(&prompt, work_dir, Duration::from_secs(cfg.timeout_secs))
        .await?;

    let reply = match invocation {
        Invocation::Completed {
            exit_code,
            stdout,
            stderr,
        } => {
            if exit_code != 0 {
                tracing::warn!(
                    target: "shellbench.compare",
                    exit_code,
                    stderr = %stderr.trim(),
                    "assessment exited non-zero"
                );
            }
            stdout
        }
        Invocation::TimedOut { elapsed, stdout, .. } => {
            tracing::warn!(
                target: "shellbench.compare",
                elapsed_secs = elapsed.as_secs_f64(),
                "assessment timed out, keeping partial reply"
            );
            stdout
        }
    };

    let body = format!(
        "{REPORT_TITLE}\n\nGenerated: {}\n\n{reply}",
        Utc::now().to_rfc3339()
    );
    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| CompareError::WriteReport {
                path: parent.display().to_string(),
                source,
            })?;
    }
    tokio::fs::write(output, body)
        .await
        .map_err(|source| CompareError::WriteReport {
            path: output.display().to_string(),
            source,
        })?;

    tracing::info!(target: "shellbench.compare", path = %output.display(), "report written");
    Ok(output.to_path_buf())
}
