use std::time::Duration;

/// Progress notifications emitted by the batch loop.
///
/// Kept free of any rendering concerns; the binary decides how to show them.
#[derive(Debug, Clone, PartialEq)]
pub enum SuiteEvent {
    RunStarted {
        total: usize,
        mcp_enabled: bool,
    },
    PromptStarted {
        index: usize,
        total: usize,
        prompt_id: String,
        category: String,
    },
    PromptFinished {
        index: usize,
        total: usize,
        prompt_id: String,
        success: bool,
        duration: Duration,
        /// First error, cut to `ERROR_SNIPPET_CHARS`.
        first_error: Option<String>,
    },
    RunFinished {
        total: usize,
        successful: usize,
        failed: usize,
    },
}

pub const ERROR_SNIPPET_CHARS: usize = 50;
