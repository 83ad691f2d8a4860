//! Data models for conversation exports.
//!
//! - [`Conversation`] - one decoded element of the export array, kept whole for passthrough
//! - [`MessageView`] / [`Role`] - borrowed view of a node's message
//! - [`MessageContent`] - the content shapes found in exports, as a tagged union
//! - [`IndexRow`] / [`MessageRow`] - the rows of `index.csv` and `messages.csv`

pub mod content;
pub mod conversation;
pub mod rows;

pub use content::MessageContent;
pub use conversation::{Conversation, MessageView, Role, cell_text};
pub use rows::{INDEX_HEADER, IndexRow, MESSAGES_HEADER, MessageRow};
