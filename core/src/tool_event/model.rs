use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upper bound on error text kept per tool call or error entry.
pub const MAX_ERROR_CHARS: usize = 200;

/// One tool invocation observed in the assistant's output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool_name: String,

    #[serde(default)]
    pub tool_input: Map<String, Value>,

    #[serde(default)]
    pub tool_result: Option<String>,

    #[serde(default = "default_success")]
    pub success: bool,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_use_id: Option<String>,
}

fn default_success() -> bool {
    true
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>, tool_input: Map<String, Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_input,
            tool_result: None,
            success: true,
            error: None,
            tool_use_id: None,
        }
    }

    /// The `command` field of the input, when the tool was given one.
    pub fn command(&self) -> Option<String> {
        self.tool_input.get("command").map(value_to_text)
    }

    pub(crate) fn attach_result(&mut self, content: &str, is_error: bool) {
        self.tool_result = Some(content.to_string());
        if is_error {
            self.success = false;
            self.error = Some(truncate_chars(content, MAX_ERROR_CHARS));
        }
    }
}

/// Events of the assistant stream this crate interprets; everything else is dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    ToolUse {
        id: Option<String>,
        name: String,
        input: Map<String, Value>,
    },
    ToolResult {
        tool_use_id: Option<String>,
        content: Option<String>,
        is_error: bool,
    },
    Error {
        message: String,
    },
}

pub(crate) fn value_to_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let texts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(o) => o.get("text").and_then(|t| t.as_str()).map(str::to_string),
                    _ => None,
                })
                .collect();
            if texts.is_empty() {
                v.to_string()
            } else {
                texts.join("\n")
            }
        }
        _ => v.to_string(),
    }
}

pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}
