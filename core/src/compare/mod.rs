mod assess;
mod summary;
mod types;

use std::path::Path;

pub use assess::{assess, assessment_prompt, REPORT_FILE, REPORT_TITLE};
pub use summary::{quick_summary, summarize_run, write_quick_summary, QUICK_SUMMARY_FILE};
pub use types::{PromptSummary, RunPair, RunSummary};

use crate::error::CompareError;
use crate::suite::{load_run, record_path};

/// Loads both run records. A comparison needs both; a missing one is named
/// in the error instead of being skipped.
pub fn load_pair(results_dir: &Path) -> Result<RunPair, CompareError> {
    let without_path = record_path(results_dir, false);
    let with_path = record_path(results_dir, true);

    for (label, path) in [("without-mcp", &without_path), ("with-mcp", &with_path)] {
        if !path.exists() {
            tracing::warn!(target: "shellbench.compare", label, path = %path.display(), "run record missing");
            return Err(CompareError::MissingRun {
                label,
                path: path.display().to_string(),
            });
        }
    }

    let pair = RunPair {
        without_mcp: load_run(&without_path)?,
        with_mcp: load_run(&with_path)?,
    };
    tracing::info!(
        target: "shellbench.compare",
        without_total = pair.without_mcp.total_prompts,
        with_total = pair.with_mcp.total_prompts,
        "run records loaded"
    );
    Ok(pair)
}
