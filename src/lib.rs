//! Conversation Splitter - Stream a ChatGPT `conversations.json` export into bounded parts
//!
//! Exports are a single JSON array that can run to gigabytes. This library walks the array
//! one element at a time and never holds more than the pending part in memory. It supports:
//!
//! - Scanning top-level array elements with a small state machine ([`ArrayScanner`])
//! - Grouping conversations into `conversations_part_NNN.json` files bounded by record
//!   count and serialized size
//! - Writing `index.csv` with per-conversation statistics and its part file
//! - Optionally flattening user/assistant messages into `messages.csv`
//! - Searching `messages.csv` and rendering one conversation as HTML ([`viewer`])
//!
//! # Example
//!
//! ```no_run
//! use conversation_splitter::{PartitionLimits, SplitConfig, split_conversations};
//! use std::path::PathBuf;
//!
//! let config = SplitConfig {
//!     input: PathBuf::from("conversations.json"),
//!     out_dir: PathBuf::from("parts"),
//!     limits: PartitionLimits { max_records: 100, max_bytes: 10 * 1024 * 1024 },
//!     emit_messages_csv: true,
//! };
//! let report = split_conversations(&config)?;
//! println!("Wrote {} part files", report.parts.len());
//! # Ok::<(), conversation_splitter::SplitError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod output;
pub mod parsers;
pub mod partition;
pub mod splitter;
pub mod utils;
pub mod viewer;

// Re-export commonly used types
pub use config::{PartitionLimits, SplitConfig};
pub use error::SplitError;
pub use models::{Conversation, IndexRow, MessageRow};
pub use parsers::{ArrayScanner, decode_span};
pub use splitter::{SplitReport, split_conversations, split_reader};
pub use utils::parse_size;
