//! Search and HTML export over a `messages.csv` produced by a split
//!
//! - [`read_messages`] streams the table row by row (BOM-aware, no field size cap)
//! - [`find_conversations`] lists distinct conversations whose id or title matches a query
//! - [`collect_conversation`] gathers one conversation's rows in time order
//! - [`render_html`] turns those rows into a standalone HTML page

pub mod html;
pub mod search;

use std::path::{Path, PathBuf};

pub use html::{escape_html, render_html};
pub use search::{
    ConversationHit, MessageRows, collect_conversation, find_conversations, read_messages,
};

/// Locations checked, in order, when no `messages.csv` path is given
pub const MESSAGES_CSV_CANDIDATES: [&str; 3] =
    ["parts_small_utf8/messages.csv", "parts_small/messages.csv", "parts/messages.csv"];

/// First existing candidate under `base`
pub fn autodetect_messages_csv(base: &Path) -> Option<PathBuf> {
    MESSAGES_CSV_CANDIDATES.iter().map(|candidate| base.join(candidate)).find(|path| path.is_file())
}
