use serde::{Deserialize, Serialize};

pub const INDEX_HEADER: [&str; 6] =
    ["conversation_id", "title", "messages", "first_time", "last_time", "part_file"];

pub const MESSAGES_HEADER: [&str; 5] = ["conversation_id", "title", "time", "role", "text"];

/// One line of `index.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRow {
    pub conversation_id: String,
    pub title: String,
    pub messages: usize,
    pub first_time: String,
    pub last_time: String,
    /// Name of the part file that holds this conversation
    pub part_file: String,
}

/// One line of `messages.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRow {
    pub conversation_id: String,
    pub title: String,
    #[serde(default)]
    pub time: String,
    pub role: String,
    #[serde(default)]
    pub text: String,
}
