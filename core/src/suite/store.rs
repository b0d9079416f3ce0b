use std::path::{Path, PathBuf};

use super::types::TestRun;
use crate::error::StoreError;

pub const WITH_MCP_FILE: &str = "with-mcp.json";
pub const WITHOUT_MCP_FILE: &str = "without-mcp.json";

/// Where the record for a configuration lives; the comparator finds both
/// halves by this flag alone.
pub fn record_path(results_dir: &Path, mcp_enabled: bool) -> PathBuf {
    results_dir.join(if mcp_enabled {
        WITH_MCP_FILE
    } else {
        WITHOUT_MCP_FILE
    })
}

/// Writes the whole run once, as pretty JSON. Returns the written path.
pub fn save_run(results_dir: &Path, run: &TestRun) -> Result<PathBuf, StoreError> {
    run.verify_counts()?;

    let path = record_path(results_dir, run.mcp_enabled);
    std::fs::create_dir_all(results_dir).map_err(|source| StoreError::Write {
        path: results_dir.display().to_string(),
        source,
    })?;
    let body = serde_json::to_string_pretty(run).map_err(|source| StoreError::Serde {
        path: path.display().to_string(),
        source,
    })?;
    std::fs::write(&path, body).map_err(|source| StoreError::Write {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!(
        target: "shellbench.suite",
        path = %path.display(),
        total = run.total_prompts,
        "run record saved"
    );
    Ok(path)
}

pub fn load_run(path: &Path) -> Result<TestRun, StoreError> {
    let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Serde {
        path: path.display().to_string(),
        source,
    })
}
