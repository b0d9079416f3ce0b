use serde::{Deserialize, Serialize};

use crate::catalog::Prompt;
use crate::tool_event::ToolCall;

/// Outcome of executing one prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub prompt_id: String,
    pub prompt_category: String,
    pub prompt_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<String>,

    pub execution_success: bool,

    #[serde(default = "default_exit_code")]
    pub exit_code: i32,

    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,

    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub commands_used: Vec<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,

    #[serde(default)]
    pub used_bash_style: bool,
    #[serde(default)]
    pub used_windows_style: bool,

    #[serde(default)]
    pub duration_seconds: f64,

    #[serde(default)]
    pub unattributed_results: usize,
}

fn default_exit_code() -> i32 {
    -1
}

impl TestResult {
    /// A failed, empty result for `prompt`; the executor fills it in.
    pub fn new(prompt: &Prompt) -> Self {
        Self {
            prompt_id: prompt.id.clone(),
            prompt_category: prompt.category.clone(),
            prompt_text: prompt.text.clone(),
            triggers: prompt.triggers.clone(),
            execution_success: false,
            exit_code: default_exit_code(),
            stdout: String::new(),
            stderr: String::new(),
            errors: Vec::new(),
            commands_used: Vec::new(),
            tool_calls: Vec::new(),
            used_bash_style: false,
            used_windows_style: false,
            duration_seconds: 0.0,
            unattributed_results: 0,
        }
    }

    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}
