//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use conversation_splitter::{PartitionLimits, SplitConfig};
use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Builder for a temp directory holding a `conversations.json` export
pub struct ExportBuilder {
    temp_dir: TempDir,
    conversations: Vec<Value>,
}

impl ExportBuilder {
    /// Create a new builder with no conversations
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, conversations: Vec::new() }
    }

    /// Get the path to the temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a conversation
    pub fn with_conversation(mut self, conversation: ConversationBuilder) -> Self {
        self.conversations.push(conversation.to_value());
        self
    }

    /// Add a raw JSON element as-is
    pub fn with_value(mut self, value: Value) -> Self {
        self.conversations.push(value);
        self
    }

    /// Write `conversations.json` as a compact array and return the temp directory
    pub fn build(self) -> TempDir {
        let content = serde_json::to_string(&Value::Array(self.conversations))
            .expect("Failed to serialize export");
        write_input(self.temp_dir.path(), &content);
        self.temp_dir
    }

    /// Write `conversations.json` with the given raw content instead of the added conversations
    pub fn build_raw(self, content: &str) -> TempDir {
        write_input(self.temp_dir.path(), content);
        self.temp_dir
    }
}

impl Default for ExportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_input(dir: &Path, content: &str) {
    fs::write(dir.join("conversations.json"), content).expect("Failed to write conversations.json");
}

/// Config reading `<dir>/conversations.json` and writing to `<dir>/parts`
pub fn config(dir: &Path, max_records: usize, max_bytes: u64) -> SplitConfig {
    SplitConfig {
        input: dir.join("conversations.json"),
        out_dir: dir.join("parts"),
        limits: PartitionLimits { max_records, max_bytes },
        emit_messages_csv: false,
    }
}

/// Builder for one conversation element
pub struct ConversationBuilder {
    id: Option<String>,
    title: Option<String>,
    messages: Vec<MessageBuilder>,
    padding: usize,
}

impl ConversationBuilder {
    /// Create a conversation with the given id and no messages
    pub fn new(id: &str) -> Self {
        Self { id: Some(id.to_string()), title: None, messages: Vec::new(), padding: 0 }
    }

    /// Create a conversation without an `id` field
    pub fn without_id() -> Self {
        Self { id: None, title: None, messages: Vec::new(), padding: 0 }
    }

    /// Set the title
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Add a message
    pub fn message(mut self, message: MessageBuilder) -> Self {
        self.messages.push(message);
        self
    }

    /// Add a `padding` string field of `len` bytes to reach a target size
    pub fn padding(mut self, len: usize) -> Self {
        self.padding = len;
        self
    }

    /// Convert to a JSON value
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        if let Some(id) = &self.id {
            object.insert("id".to_string(), json!(id));
        }
        if let Some(title) = &self.title {
            object.insert("title".to_string(), json!(title));
        }

        let mut mapping = Map::new();
        mapping.insert("root".to_string(), json!({"message": null, "children": []}));
        for (i, message) in self.messages.iter().enumerate() {
            mapping.insert(format!("node-{i}"), json!({"message": message.to_value()}));
        }
        object.insert("mapping".to_string(), Value::Object(mapping));

        if self.padding > 0 {
            object.insert("padding".to_string(), json!("x".repeat(self.padding)));
        }
        Value::Object(object)
    }
}

/// Builder for a message inside a conversation's `mapping`
pub struct MessageBuilder {
    role: String,
    create_time: Option<f64>,
    content: Value,
}

impl MessageBuilder {
    /// A user message with `{"parts": [text]}` content
    pub fn user(text: &str) -> Self {
        Self::with_role("user", text)
    }

    /// An assistant message with `{"parts": [text]}` content
    pub fn assistant(text: &str) -> Self {
        Self::with_role("assistant", text)
    }

    /// A message with any role
    pub fn with_role(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            create_time: None,
            content: json!({"content_type": "text", "parts": [text]}),
        }
    }

    /// Set `create_time` in epoch seconds
    pub fn at(mut self, create_time: f64) -> Self {
        self.create_time = Some(create_time);
        self
    }

    /// Replace the content value
    pub fn content(mut self, content: Value) -> Self {
        self.content = content;
        self
    }

    /// Convert to a JSON value
    pub fn to_value(&self) -> Value {
        let mut message = json!({"author": {"role": self.role}, "content": self.content});
        if let Some(create_time) = self.create_time {
            message["create_time"] = json!(create_time);
        }
        message
    }
}

/// Part file names in `out_dir`, sorted
pub fn part_file_names(out_dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(out_dir)
        .expect("Failed to read output dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("conversations_part_") && name.ends_with(".json"))
        .collect();
    names.sort();
    names
}

/// Ids stored in a part file, in file order
pub fn part_ids(path: &Path) -> Vec<String> {
    let parsed: Value =
        serde_json::from_str(&fs::read_to_string(path).expect("Failed to read part file"))
            .expect("Part file is not valid JSON");
    parsed
        .as_array()
        .expect("Part file is not an array")
        .iter()
        .map(|c| c["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Reads a BOM-prefixed CSV into string records, header included
pub fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let bytes = fs::read(path).expect("Failed to read csv");
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "CSV should start with a UTF-8 BOM");
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(&bytes[3..])
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect()
}

/// `out_dir/name`
pub fn out_file(dir: &Path, name: &str) -> PathBuf {
    dir.join("parts").join(name)
}
