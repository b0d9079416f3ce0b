mod command;
mod execute;
pub mod exit;
mod invoker;
mod process;
mod signatures;
pub mod types;

pub use command::{AssistantCommand, OutputMode};
pub use execute::PromptExecutor;
pub use invoker::{AssistantInvoker, Invocation};
pub use process::ProcessAssistant;
pub use signatures::{FailureSignatures, DEFAULT_FAILURE_SIGNATURES, PATTERN_PREFIX};
pub use types::TestResult;
