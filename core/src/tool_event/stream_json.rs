use serde_json::{Map, Value};

use super::model::{value_to_text, StreamEvent};

/// Parses one line of the assistant's `stream-json` output.
///
/// Best-effort:
/// - Non-JSON lines and unknown event types yield nothing.
/// - Both the flat shape (`{"type":"tool_use",...}`) and the message envelope
///   (`{"type":"assistant","message":{"content":[{"type":"tool_use",...}]}}`)
///   are understood; envelope items come out in their original order.
pub fn parse_stream_line(line: &str) -> Vec<StreamEvent> {
    let s = line.trim();
    if !(s.starts_with('{') && s.ends_with('}')) {
        return Vec::new();
    }

    let v: Value = match serde_json::from_str(s) {
        Ok(v) => v,
        Err(e) => {
            tracing::trace!(target: "shellbench.tool_event", error = %e, "skipping non-json line");
            return Vec::new();
        }
    };

    match v.get("type").and_then(|x| x.as_str()) {
        Some("tool_use") => vec![tool_use(&v)],
        Some("tool_result") => vec![tool_result(&v, None)],
        Some("error") => vec![StreamEvent::Error {
            message: v
                .get("message")
                .map(error_message)
                .unwrap_or_else(|| "Unknown error".to_string()),
        }],
        Some("assistant") | Some("user") => envelope_items(&v),
        _ => Vec::new(),
    }
}

fn envelope_items(v: &Value) -> Vec<StreamEvent> {
    let Some(items) = v
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_array())
    else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item.get("type").and_then(|x| x.as_str()) {
            Some("tool_use") => Some(tool_use(item)),
            Some("tool_result") => Some(tool_result(item, v.get("tool_use_result"))),
            _ => None,
        })
        .collect()
}

fn tool_use(item: &Value) -> StreamEvent {
    let input = match item.get("input") {
        Some(Value::Object(m)) => m.clone(),
        _ => Map::new(),
    };
    StreamEvent::ToolUse {
        id: str_field(item, "id"),
        name: str_field(item, "name").unwrap_or_else(|| "unknown".to_string()),
        input,
    }
}

fn tool_result(item: &Value, envelope_result: Option<&Value>) -> StreamEvent {
    let is_error = item
        .get("is_error")
        .and_then(|x| x.as_bool())
        .or_else(|| {
            envelope_result
                .and_then(|r| r.get("is_error").or_else(|| r.get("isError")))
                .and_then(|x| x.as_bool())
        })
        .unwrap_or(false);

    StreamEvent::ToolResult {
        tool_use_id: str_field(item, "tool_use_id"),
        content: item.get("content").filter(|c| !c.is_null()).map(value_to_text),
        is_error,
    }
}

fn error_message(v: &Value) -> String {
    match v {
        Value::Object(o) => o
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| v.to_string()),
        other => value_to_text(other),
    }
}

fn str_field(v: &Value, key: &str) -> Option<String> {
    v.get(key).and_then(|x| x.as_str()).map(|x| x.to_string())
}
