use serde_json::Value;

use crate::error::{DECODE_SNIPPET_CHARS, Result, SplitError};
use crate::models::Conversation;

/// Decodes one raw element into a [`Conversation`]
///
/// On failure the error carries the first [`DECODE_SNIPPET_CHARS`] characters of the span
/// (lossily decoded if the span is not valid UTF-8) next to the `serde_json` error.
pub fn decode_span(span: &[u8]) -> Result<Conversation> {
    serde_json::from_slice::<Value>(span)
        .map(Conversation::from_value)
        .map_err(|source| SplitError::Decode { snippet: snippet(span), source })
}

fn snippet(span: &[u8]) -> String {
    String::from_utf8_lossy(span).chars().take(DECODE_SNIPPET_CHARS).collect()
}
