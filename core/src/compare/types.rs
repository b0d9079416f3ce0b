use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::suite::TestRun;

/// Both halves of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPair {
    pub without_mcp: TestRun,
    pub with_mcp: TestRun,
}

/// A run cut down to what fits into a report prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub mcp_enabled: bool,
    pub timestamp: DateTime<Utc>,
    pub total_prompts: usize,
    pub successful_prompts: usize,
    pub failed_prompts: usize,
    pub bash_style_count: usize,
    pub windows_style_count: usize,
    pub results: Vec<PromptSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptSummary {
    pub id: String,
    pub category: String,
    pub prompt: String,
    pub success: bool,
    pub bash_style: bool,
    pub windows_style: bool,
    pub commands: Vec<String>,
    pub errors: Vec<String>,
}
