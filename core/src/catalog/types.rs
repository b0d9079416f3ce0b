use serde::{Deserialize, Serialize};

/// A single natural-language prompt driven through the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub category: String,
    pub text: String,

    /// Free-form note on which shell idiom the prompt is expected to trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCatalog {
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

impl PromptCatalog {
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}
