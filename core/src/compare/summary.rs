use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::types::{PromptSummary, RunPair, RunSummary};
use crate::config::ReportConfig;
use crate::error::CompareError;
use crate::suite::TestRun;
use crate::tool_event::truncate_chars;

pub const QUICK_SUMMARY_FILE: &str = "quick-summary.md";

const PROMPT_CHARS: usize = 100;
const FAILED_PROMPT_CHARS: usize = 50;
const FAILED_ERROR_CHARS: usize = 100;

pub fn summarize_run(run: &TestRun, cfg: &ReportConfig) -> RunSummary {
    RunSummary {
        mcp_enabled: run.mcp_enabled,
        timestamp: run.timestamp,
        total_prompts: run.total_prompts,
        successful_prompts: run.successful_prompts,
        failed_prompts: run.failed_prompts,
        bash_style_count: run.bash_style_count,
        windows_style_count: run.windows_style_count,
        results: run
            .results
            .iter()
            .map(|r| PromptSummary {
                id: r.prompt_id.clone(),
                category: r.prompt_category.clone(),
                prompt: truncate_chars(&r.prompt_text, PROMPT_CHARS),
                success: r.execution_success,
                bash_style: r.used_bash_style,
                windows_style: r.used_windows_style,
                commands: r
                    .commands_used
                    .iter()
                    .take(cfg.summary_commands_per_prompt)
                    .cloned()
                    .collect(),
                errors: r
                    .errors
                    .iter()
                    .take(cfg.summary_errors_per_prompt)
                    .cloned()
                    .collect(),
            })
            .collect(),
    }
}

/// Deterministic Markdown comparison of the two runs.
pub fn quick_summary(pair: &RunPair) -> String {
    let without = &pair.without_mcp;
    let with = &pair.with_mcp;

    let mut out = String::from("# Quick Test Summary\n");
    write_run_section(&mut out, "Without MCP", without);
    write_run_section(&mut out, "With MCP", with);

    out.push_str("\n## Comparison\n");
    let success_diff = with.successful_prompts as i64 - without.successful_prompts as i64;
    match success_diff {
        d if d > 0 => {
            let _ = writeln!(out, "- MCP improved success by {d} prompts");
        }
        d if d < 0 => {
            let _ = writeln!(out, "- MCP decreased success by {} prompts", -d);
        }
        _ => out.push_str("- No change in success rate\n"),
    }
    let bash_diff = without.bash_style_count as i64 - with.bash_style_count as i64;
    if bash_diff > 0 {
        let _ = writeln!(out, "- Bash-style usage reduced by {bash_diff}");
    }
    let win_diff = with.windows_style_count as i64 - without.windows_style_count as i64;
    if win_diff > 0 {
        let _ = writeln!(out, "- Windows-style usage increased by {win_diff}");
    }

    write_failures(&mut out, "Without MCP", without);
    write_failures(&mut out, "With MCP", with);
    out
}

/// Renders `quick_summary` into `output`, creating its directory if needed.
pub fn write_quick_summary(pair: &RunPair, output: &Path) -> Result<PathBuf, CompareError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| CompareError::WriteReport {
            path: parent.display().to_string(),
            source,
        })?;
    }
    std::fs::write(output, quick_summary(pair)).map_err(|source| CompareError::WriteReport {
        path: output.display().to_string(),
        source,
    })?;
    tracing::info!(target: "shellbench.compare", path = %output.display(), "quick summary written");
    Ok(output.to_path_buf())
}

fn write_run_section(out: &mut String, title: &str, run: &TestRun) {
    let _ = write!(
        out,
        "\n## {title}\n\
         - Success rate: {}/{} ({:.1}%)\n\
         - Bash-style commands: {}\n\
         - Windows-style commands: {}\n",
        run.successful_prompts,
        run.total_prompts,
        run.success_rate(),
        run.bash_style_count,
        run.windows_style_count,
    );
}

fn write_failures(out: &mut String, title: &str, run: &TestRun) {
    let _ = writeln!(out, "\n## Failed Prompts ({title})");
    for r in run.failed_results() {
        let _ = writeln!(
            out,
            "- [{}] {}...",
            r.prompt_category,
            truncate_chars(&r.prompt_text, FAILED_PROMPT_CHARS)
        );
        if let Some(err) = r.first_error() {
            let _ = writeln!(out, "  - Error: {}", truncate_chars(err, FAILED_ERROR_CHARS));
        }
    }
}
