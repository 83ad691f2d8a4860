//! Per-conversation derivations: the index summary and the flattened message rows.

pub mod messages;
pub mod summary;
pub mod timestamps;

pub use messages::extract_messages;
pub use summary::{ConversationSummary, summarize};
pub use timestamps::{iso_in, iso_local};
