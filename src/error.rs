//! Error taxonomy for the split pipeline.
//!
//! Every variant is fatal: the run stops at the first one. Part files and index rows that
//! were already written stay on disk as valid partial output. The only non-fatal condition,
//! an oversized record, is reported as a warning by the partitioner and never surfaces here.

use std::io;
use std::path::PathBuf;

/// Number of characters of a failing span kept in a [`SplitError::Decode`] message
pub const DECODE_SNIPPET_CHARS: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// The first non-whitespace byte of the input is not `[`
    #[error("input is not a JSON array: expected '[' at byte {offset}, found {}", describe(.found))]
    MalformedWrapper { found: Option<char>, offset: u64 },

    /// Input ended inside an element or between elements without a closing `]`
    #[error("unexpected end of input at byte {offset}: unterminated object or array")]
    UnterminatedObject { offset: u64 },

    /// An element did not start with `{`, or a separator was neither `,` nor `]`
    #[error("unexpected character {found:?} at byte {offset}")]
    UnexpectedCharacter { found: char, offset: u64 },

    #[error("JSON error: {source}\nSnippet: {snippet}...")]
    Decode {
        snippet: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize conversation: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid size {0:?} (expected digits with optional K/M/G suffix, e.g. 50MB)")]
    SizeFormat(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error on {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl SplitError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { path: path.into(), source }
    }
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(ch) => format!("{:?}", ch),
        None => "end of input".to_string(),
    }
}

pub type Result<T, E = SplitError> = std::result::Result<T, E>;
