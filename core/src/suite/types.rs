use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::runner::TestResult;

pub const DEFAULT_MCP_SERVER: &str = "powershell";

/// Which configuration a batch is run under. The caller arranges the
/// assistant's ambient state to match; this only labels the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mcp_enabled: bool,
    pub mcp_server: Option<String>,
}

impl RunConfig {
    pub fn without_mcp() -> Self {
        Self {
            mcp_enabled: false,
            mcp_server: None,
        }
    }

    pub fn with_mcp(server: Option<String>) -> Self {
        Self {
            mcp_enabled: true,
            mcp_server: Some(server.unwrap_or_else(|| DEFAULT_MCP_SERVER.to_string())),
        }
    }
}

/// One batch of prompts under one configuration. Counters only move through `record`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    pub mcp_enabled: bool,
    pub mcp_server: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub total_prompts: usize,
    pub successful_prompts: usize,
    pub failed_prompts: usize,
    pub bash_style_count: usize,
    pub windows_style_count: usize,
    pub results: Vec<TestResult>,
}

impl TestRun {
    pub fn new(cfg: &RunConfig) -> Self {
        Self {
            mcp_enabled: cfg.mcp_enabled,
            mcp_server: cfg.mcp_server.clone(),
            timestamp: Utc::now(),
            total_prompts: 0,
            successful_prompts: 0,
            failed_prompts: 0,
            bash_style_count: 0,
            windows_style_count: 0,
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, result: TestResult) {
        self.total_prompts += 1;
        if result.execution_success {
            self.successful_prompts += 1;
        } else {
            self.failed_prompts += 1;
        }
        if result.used_bash_style {
            self.bash_style_count += 1;
        }
        if result.used_windows_style {
            self.windows_style_count += 1;
        }
        self.results.push(result);
    }

    /// `successful + failed == total == results.len()`.
    pub fn verify_counts(&self) -> Result<(), StoreError> {
        let ok = self.successful_prompts + self.failed_prompts == self.total_prompts
            && self.total_prompts == self.results.len();
        if ok {
            Ok(())
        } else {
            Err(StoreError::CountMismatch {
                successful: self.successful_prompts,
                failed: self.failed_prompts,
                total: self.total_prompts,
                results: self.results.len(),
            })
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_prompts == 0 {
            0.0
        } else {
            self.successful_prompts as f64 / self.total_prompts as f64 * 100.0
        }
    }

    pub fn failed_results(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.execution_success)
    }
}
