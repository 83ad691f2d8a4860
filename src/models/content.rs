use serde_json::Value;

/// Shapes a message `content` field takes in exports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageContent<'a> {
    /// `{"content_type": ..., "parts": [...]}`
    PartsObject(&'a [Value]),
    /// A bare `[...]` of parts
    PartsList(&'a [Value]),
    PlainString(&'a str),
    /// Null, numbers, objects without `parts`, or a missing field
    Other,
}

impl<'a> MessageContent<'a> {
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Object(map)) => match map.get("parts") {
                Some(Value::Array(parts)) => MessageContent::PartsObject(parts),
                // `parts` present but not a list contributes nothing
                Some(_) => MessageContent::PartsObject(&[]),
                None => MessageContent::Other,
            },
            Some(Value::Array(parts)) => MessageContent::PartsList(parts),
            Some(Value::String(s)) => MessageContent::PlainString(s),
            _ => MessageContent::Other,
        }
    }

    /// Plain text of the content
    pub fn text(&self) -> String {
        match self {
            MessageContent::PartsObject(parts) => parts_object_text(parts),
            MessageContent::PartsList(parts) => parts_list_text(parts),
            MessageContent::PlainString(s) => plain_string_text(s),
            MessageContent::Other => String::new(),
        }
    }
}

fn parts_object_text(parts: &[Value]) -> String {
    join_text_parts(parts)
}

fn parts_list_text(parts: &[Value]) -> String {
    join_text_parts(parts)
}

fn plain_string_text(s: &str) -> String {
    s.to_string()
}

/// Joins string parts and `{"text": "..."}` parts with newlines; tool calls, images and
/// anything else are skipped
fn join_text_parts(parts: &[Value]) -> String {
    parts.iter().filter_map(part_text).collect::<Vec<_>>().join("\n")
}

fn part_text(part: &Value) -> Option<&str> {
    match part {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("text").and_then(Value::as_str),
        _ => None,
    }
}
