use std::collections::VecDeque;

use super::model::{truncate_chars, value_to_text, StreamEvent, ToolCall, MAX_ERROR_CHARS};
use super::stream_json::parse_stream_line;

/// Everything derived from one invocation's standard output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamExtraction {
    pub commands_used: Vec<String>,
    pub tool_calls: Vec<ToolCall>,
    pub errors: Vec<String>,
    /// Tool results that could not be tied to an open tool call.
    pub unattributed_results: usize,
}

/// Incremental extractor: feed lines in stream order, then `finish`.
///
/// Results attach to the oldest tool call still waiting for one. When both the
/// call and the result carry an id, the id decides instead.
#[derive(Debug, Default)]
pub struct StreamExtractor {
    out: StreamExtraction,
    pending: VecDeque<usize>,
}

impl StreamExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_line(&mut self, line: &str) {
        for ev in parse_stream_line(line) {
            self.observe_event(ev);
        }
    }

    pub fn observe_event(&mut self, ev: StreamEvent) {
        match ev {
            StreamEvent::ToolUse { id, name, input } => {
                if let Some(cmd) = input.get("command") {
                    self.out.commands_used.push(value_to_text(cmd));
                }
                let mut call = ToolCall::new(name, input);
                call.tool_use_id = id;
                self.pending.push_back(self.out.tool_calls.len());
                self.out.tool_calls.push(call);
            }
            StreamEvent::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => {
                if is_error {
                    let msg = content.as_deref().unwrap_or("Unknown error");
                    self.out.errors.push(truncate_chars(msg, MAX_ERROR_CHARS));
                }
                match self.take_pending(tool_use_id.as_deref()) {
                    Some(idx) => {
                        let content = match (&content, is_error) {
                            (Some(c), _) => c.as_str(),
                            (None, true) => "Unknown error",
                            (None, false) => "",
                        };
                        self.out.tool_calls[idx].attach_result(content, is_error);
                    }
                    None => {
                        self.out.unattributed_results += 1;
                        tracing::debug!(
                            target: "shellbench.tool_event",
                            tool_use_id = ?tool_use_id,
                            is_error,
                            "tool result without a matching tool call"
                        );
                    }
                }
            }
            StreamEvent::Error { message } => {
                self.out.errors.push(truncate_chars(&message, MAX_ERROR_CHARS));
            }
        }
    }

    fn take_pending(&mut self, result_id: Option<&str>) -> Option<usize> {
        let calls = &self.out.tool_calls;
        let pos = match result_id {
            Some(rid) => self
                .pending
                .iter()
                .position(|&i| calls[i].tool_use_id.as_deref() == Some(rid)),
            None => {
                if self.pending.is_empty() {
                    None
                } else {
                    Some(0)
                }
            }
        }?;
        self.pending.remove(pos)
    }

    pub fn finish(self) -> StreamExtraction {
        if !self.pending.is_empty() {
            tracing::debug!(
                target: "shellbench.tool_event",
                open_calls = self.pending.len(),
                "stream ended with tool calls still awaiting results"
            );
        }
        self.out
    }
}

/// Extracts commands, tool calls and errors from a complete stdout capture.
pub fn extract_stream(stdout: &str) -> StreamExtraction {
    let mut ex = StreamExtractor::new();
    for line in stdout.lines() {
        ex.observe_line(line);
    }
    ex.finish()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn use_line(name: &str, cmd: &str) -> String {
        serde_json::json!({"type": "tool_use", "name": name, "input": {"command": cmd}}).to_string()
    }

    fn result_line(content: &str, is_error: bool) -> String {
        serde_json::json!({"type": "tool_result", "content": content, "is_error": is_error})
            .to_string()
    }

    #[test]
    fn noise_between_pairs_contributes_nothing() {
        let stdout = [
            use_line("Bash", "ls -la"),
            result_line("a.txt", false),
            "warning: telemetry disabled".to_string(),
            use_line("Bash", "cat a.txt"),
            result_line("cat: a.txt: No such file", true),
        ]
        .join("\n");

        let out = extract_stream(&stdout);
        assert_eq!(out.commands_used, vec!["ls -la", "cat a.txt"]);
        assert_eq!(out.tool_calls.len(), 2);
        assert!(out.tool_calls[0].success);
        assert_eq!(out.tool_calls[0].tool_result.as_deref(), Some("a.txt"));
        assert!(!out.tool_calls[1].success);
        assert_eq!(
            out.tool_calls[1].error.as_deref(),
            Some("cat: a.txt: No such file")
        );
        assert_eq!(out.errors, vec!["cat: a.txt: No such file"]);
        assert_eq!(out.unattributed_results, 0);
    }

    #[test]
    fn consecutive_calls_correlate_by_order() {
        let stdout = [
            use_line("Bash", "uname -a"),
            use_line("Bash", "Get-Process"),
            result_line("first output", false),
            result_line("second failed", true),
        ]
        .join("\n");

        let out = extract_stream(&stdout);
        assert_eq!(out.tool_calls[0].tool_result.as_deref(), Some("first output"));
        assert!(out.tool_calls[0].success);
        assert_eq!(out.tool_calls[1].tool_result.as_deref(), Some("second failed"));
        assert!(!out.tool_calls[1].success);
    }

    #[test]
    fn ids_override_arrival_order() {
        let stdout = [
            r#"{"type":"tool_use","id":"a","name":"Bash","input":{"command":"one"}}"#,
            r#"{"type":"tool_use","id":"b","name":"Bash","input":{"command":"two"}}"#,
            r#"{"type":"tool_result","tool_use_id":"b","content":"for b"}"#,
            r#"{"type":"tool_result","tool_use_id":"a","content":"for a"}"#,
        ]
        .join("\n");

        let out = extract_stream(&stdout);
        assert_eq!(out.tool_calls[0].tool_result.as_deref(), Some("for a"));
        assert_eq!(out.tool_calls[1].tool_result.as_deref(), Some("for b"));
    }

    #[test]
    fn orphan_result_is_unattributed_but_error_kept() {
        let stdout = [
            result_line("nobody asked", true),
            use_line("Bash", "ls"),
            r#"{"type":"tool_result","tool_use_id":"ghost","content":"x"}"#.to_string(),
        ]
        .join("\n");

        let out = extract_stream(&stdout);
        assert_eq!(out.unattributed_results, 2);
        assert_eq!(out.errors, vec!["nobody asked"]);
        assert_eq!(out.tool_calls[0].tool_result, None);
        assert!(out.tool_calls[0].success);
    }

    #[test]
    fn unknown_id_leaves_open_calls_pending() {
        let stdout = [
            use_line("Bash", "ls"),
            r#"{"type":"tool_result","tool_use_id":"ghost","content":"x","is_error":true}"#.to_string(),
            result_line("listing", false),
        ]
        .join("\n");

        let out = extract_stream(&stdout);
        assert_eq!(out.unattributed_results, 1);
        assert_eq!(out.errors, vec!["x"]);
        assert_eq!(out.tool_calls[0].tool_result.as_deref(), Some("listing"));
        assert!(out.tool_calls[0].success);
    }

    #[test]
    fn mismatched_ids_do_not_misattribute() {
        let stdout = [
            r#"{"type":"tool_use","id":"a","name":"Bash","input":{"command":"one"}}"#,
            r#"{"type":"tool_result","tool_use_id":"zzz","content":"stray","is_error":true}"#,
        ]
        .join("\n");

        let out = extract_stream(&stdout);
        assert_eq!(out.unattributed_results, 1);
        assert!(out.tool_calls[0].success);
        assert_eq!(out.tool_calls[0].tool_result, None);
        assert_eq!(out.errors, vec!["stray"]);
    }

    #[test]
    fn top_level_error_events_are_collected_in_order() {
        let stdout = [
            r#"{"type":"error","message":"rate limited"}"#.to_string(),
            use_line("Bash", "ls"),
            result_line("denied", true),
        ]
        .join("\n");
        assert_eq!(extract_stream(&stdout).errors, vec!["rate limited", "denied"]);
    }

    #[test]
    fn error_text_is_truncated() {
        let long = "x".repeat(500);
        let out = extract_stream(&[use_line("Bash", "ls"), result_line(&long, true)].join("\n"));
        assert_eq!(out.errors[0].chars().count(), 200);
        assert_eq!(out.tool_calls[0].error.as_ref().map(|e| e.chars().count()), Some(200));
    }

    #[test]
    fn tool_without_command_is_recorded_but_not_a_command() {
        let stdout = r#"{"type":"tool_use","name":"Read","input":{"file_path":"/tmp/a"}}"#;
        let out = extract_stream(stdout);
        assert!(out.commands_used.is_empty());
        assert_eq!(out.tool_calls.len(), 1);
        assert_eq!(out.tool_calls[0].tool_name, "Read");
    }

    #[test]
    fn garbage_input_yields_empty_extraction() {
        assert_eq!(extract_stream("\n\nnot json\n{\"broken\":"), StreamExtraction::default());
    }
}
