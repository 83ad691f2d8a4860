//! The split pipeline: scan, decode, summarize, place, index.
//!
//! One forward pass over the input. Each element goes through, in this order:
//!
//! 1. [`ArrayScanner`] cuts the raw span out of the input
//! 2. [`decode_span`] turns it into a [`Conversation`]
//! 3. [`summarize`] computes the index statistics
//! 4. [`extract_messages`] feeds `messages.csv` when enabled
//! 5. [`Partitioner::accept`] flushes the previous batch if needed and places the record
//! 6. [`IndexWriter::append`] records the placement
//!
//! Steps 5 and 6 are back to back for every record, which keeps each index row pointing at
//! the file its conversation ends up in. The first error aborts the run; files written up
//! to that point stay on disk.

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::SplitConfig;
use crate::error::{Result, SplitError};
use crate::extract::{extract_messages, summarize};
use crate::models::Conversation;
use crate::output::{IndexWriter, MessagesWriter};
use crate::parsers::{ArrayScanner, decode_span};
use crate::partition::{PartFile, Partitioner};

/// Conversation that was larger than `max_bytes` on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OversizedConversation {
    pub id: String,
    pub bytes: u64,
    pub part_file: String,
}

/// Outcome of a completed split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub out_dir: PathBuf,
    pub conversations: usize,
    pub parts: Vec<PartFile>,
    pub index_path: PathBuf,
    pub messages_path: Option<PathBuf>,
    pub messages_written: usize,
    pub oversized: Vec<OversizedConversation>,
}

/// Splits the export named by `config.input` into `config.out_dir`
///
/// # Errors
///
/// Returns the first [`SplitError`] hit: invalid configuration, unreadable input, a
/// structural or decode error in the input, or a failed write.
///
/// # Examples
///
/// ```no_run
/// use conversation_splitter::{SplitConfig, split_conversations};
///
/// let report = split_conversations(&SplitConfig::default())?;
/// println!("{} conversations in {} parts", report.conversations, report.parts.len());
/// # Ok::<(), conversation_splitter::SplitError>(())
/// ```
pub fn split_conversations(config: &SplitConfig) -> Result<SplitReport> {
    config.validate()?;
    let scanner = ArrayScanner::open(&config.input)?;
    split_from_scanner(scanner, config)
}

/// Same as [`split_conversations`] but reads the export from `reader`; `config.input` is
/// only used in error messages
pub fn split_reader<R: BufRead>(reader: R, config: &SplitConfig) -> Result<SplitReport> {
    config.validate()?;
    split_from_scanner(ArrayScanner::new(reader).with_source(&config.input), config)
}

fn split_from_scanner<R: BufRead>(
    mut scanner: ArrayScanner<R>,
    config: &SplitConfig,
) -> Result<SplitReport> {
    // Check the wrapper before creating anything on disk
    let first = scanner.next().transpose()?;

    let out_dir = config.out_dir.as_path();
    fs::create_dir_all(out_dir).map_err(|e| SplitError::io(out_dir, e))?;

    let mut index = IndexWriter::create(out_dir)?;
    let mut messages =
        if config.emit_messages_csv { Some(MessagesWriter::create(out_dir)?) } else { None };
    let mut partitioner = Partitioner::new(out_dir, config.limits);
    let mut oversized = Vec::new();
    let mut conversations = 0usize;

    for span in first.into_iter().map(Ok).chain(scanner) {
        let span = span?;
        let conversation = decode_span(span.as_bytes())?;
        debug!(offset = span.offset, len = span.len(), "decoded conversation");

        process_conversation(
            &conversation,
            &mut partitioner,
            &mut index,
            messages.as_mut(),
            &mut oversized,
        )?;
        conversations += 1;
    }

    let parts = partitioner.finish()?;
    let messages_written = messages.as_ref().map_or(0, MessagesWriter::rows);
    let messages_path = messages.map(MessagesWriter::finish).transpose()?;
    let index_path = index.finish()?;

    Ok(SplitReport {
        out_dir: out_dir.to_path_buf(),
        conversations,
        parts,
        index_path,
        messages_path,
        messages_written,
        oversized,
    })
}

fn process_conversation(
    conversation: &Conversation,
    partitioner: &mut Partitioner,
    index: &mut IndexWriter,
    messages: Option<&mut MessagesWriter>,
    oversized: &mut Vec<OversizedConversation>,
) -> Result<()> {
    let summary = summarize(conversation);

    if let Some(messages) = messages {
        messages.append_all(&extract_messages(conversation))?;
    }

    let placement = partitioner.accept(conversation)?;
    let row = index.append(conversation, &summary, &placement)?;

    if placement.oversized {
        oversized.push(OversizedConversation {
            id: row.conversation_id,
            bytes: placement.bytes,
            part_file: placement.part_file,
        });
    }
    Ok(())
}

/// Part files present in `out_dir`, sorted by name
///
/// Used for the end-of-run listing; it also picks up parts left by earlier runs.
pub fn list_part_files(out_dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(out_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_str().is_some_and(crate::partition::is_part_file_name))
        .map(|entry| entry.into_path())
        .collect()
}
