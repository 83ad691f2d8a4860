use serde_json::Value;

use super::content::MessageContent;
use crate::error::{Result, SplitError};

/// One element of the export array
///
/// The decoded tree is kept whole so it can be written back out unchanged; only `id`,
/// `title` and `mapping` are interpreted, through the accessors below. Missing or oddly
/// typed fields read as absent instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    value: Value,
}

impl Conversation {
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn id(&self) -> Option<&str> {
        self.value.get("id").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.value.get("title").and_then(Value::as_str)
    }

    /// `id` as a CSV cell
    pub fn id_cell(&self) -> String {
        cell_text(self.value.get("id"))
    }

    /// `title` as a CSV cell
    pub fn title_cell(&self) -> String {
        cell_text(self.value.get("title"))
    }

    /// Messages of every node in `mapping`, in mapping order
    ///
    /// Nodes that are null or carry no message object are skipped.
    pub fn messages(&self) -> impl Iterator<Item = MessageView<'_>> {
        self.value
            .get("mapping")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|mapping| mapping.values())
            .filter_map(|node| node.get("message"))
            .filter(|message| message.is_object())
            .map(|value| MessageView { value })
    }

    /// Compact, non-ASCII-escaped JSON text of the whole record
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.value).map_err(SplitError::Encode)
    }
}

/// Author role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    /// Any other role (`system`, `tool`, ...) or no role at all
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other => "other",
        }
    }

    /// Whether messages with this role are counted and exported
    pub fn is_conversational(&self) -> bool {
        matches!(self, Role::User | Role::Assistant)
    }
}

/// Borrowed view of one node's `message` object
#[derive(Debug, Clone, Copy)]
pub struct MessageView<'a> {
    value: &'a Value,
}

impl<'a> MessageView<'a> {
    pub fn role(&self) -> Role {
        match self.value.get("author").and_then(|a| a.get("role")).and_then(Value::as_str) {
            Some("user") => Role::User,
            Some("assistant") => Role::Assistant,
            _ => Role::Other,
        }
    }

    /// `create_time` when it is a JSON number
    pub fn create_time(&self) -> Option<f64> {
        self.value.get("create_time").and_then(Value::as_f64)
    }

    pub fn content(&self) -> MessageContent<'a> {
        MessageContent::from_value(self.value.get("content"))
    }
}

/// Renders an optional JSON value as a CSV cell: strings verbatim, null or absent as empty,
/// anything else as compact JSON
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
