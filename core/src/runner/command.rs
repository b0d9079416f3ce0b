use crate::config::AssistantConfig;

/// How the assistant should format what it prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Newline-delimited JSON events; used for every benchmark prompt.
    StreamJson,
    /// Plain reply text; used for the report step.
    Text,
}

/// Argument shape of one non-interactive assistant invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantCommand {
    pub bin: String,
    pub extra_args: Vec<String>,
}

impl AssistantCommand {
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn from_config(cfg: &AssistantConfig) -> Self {
        Self {
            bin: cfg.bin.clone(),
            extra_args: cfg.extra_args.clone(),
        }
    }

    /// `-p <prompt> [--output-format stream-json] --dangerously-skip-permissions [extra...]`
    pub fn args(&self, prompt: &str, mode: OutputMode) -> Vec<String> {
        let mut args: Vec<String> = vec!["-p".to_string(), prompt.to_string()];

        if mode == OutputMode::StreamJson {
            args.push("--output-format".to_string());
            args.push("stream-json".to_string());
        }

        // Permission prompts would block a non-interactive run forever.
        args.push("--dangerously-skip-permissions".to_string());
        args.extend(self.extra_args.iter().cloned());
        args
    }
}
