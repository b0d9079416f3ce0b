use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::style::{DEFAULT_POSIX_PATTERNS, DEFAULT_WINDOWS_PATTERNS};
use crate::runner::DEFAULT_FAILURE_SIGNATURES;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub patterns: PatternConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assistant.bin.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assistant.bin must not be empty".to_string(),
            ));
        }
        if self.assistant.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "assistant.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.report.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "report.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_assistant_bin")]
    pub bin: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long to keep reading output after a timed-out child was killed.
    #[serde(default = "default_drain_grace_ms")]
    pub drain_grace_ms: u64,

    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_assistant_bin() -> String {
    "claude".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_drain_grace_ms() -> u64 {
    5_000
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            bin: default_assistant_bin(),
            timeout_secs: default_timeout_secs(),
            drain_grace_ms: default_drain_grace_ms(),
            extra_args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_prompts_path")]
    pub prompts: String,

    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

fn default_prompts_path() -> String {
    "prompts.json".to_string()
}

fn default_results_dir() -> String {
    "results".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            prompts: default_prompts_path(),
            results_dir: default_results_dir(),
        }
    }
}

/// Pattern lists are plain strings so they can be swapped from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    #[serde(default = "default_posix_patterns")]
    pub posix: Vec<String>,

    #[serde(default = "default_windows_patterns")]
    pub windows: Vec<String>,

    #[serde(default = "default_failure_signatures")]
    pub failure_signatures: Vec<String>,
}

fn default_posix_patterns() -> Vec<String> {
    DEFAULT_POSIX_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn default_windows_patterns() -> Vec<String> {
    DEFAULT_WINDOWS_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_failure_signatures() -> Vec<String> {
    DEFAULT_FAILURE_SIGNATURES
        .iter()
        .map(|p| p.to_string())
        .collect()
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            posix: default_posix_patterns(),
            windows: default_windows_patterns(),
            failure_signatures: default_failure_signatures(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_summary_errors")]
    pub summary_errors_per_prompt: usize,

    #[serde(default = "default_summary_commands")]
    pub summary_commands_per_prompt: usize,
}

fn default_report_timeout_secs() -> u64 {
    300
}

fn default_summary_errors() -> usize {
    3
}

fn default_summary_commands() -> usize {
    5
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_report_timeout_secs(),
            summary_errors_per_prompt: default_summary_errors(),
            summary_commands_per_prompt: default_summary_commands(),
        }
    }
}
