use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitError};
use crate::models::MessageRow;

/// A distinct conversation matched by [`find_conversations`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationHit {
    pub conversation_id: String,
    pub title: String,
}

/// Streaming reader over the rows of a `messages.csv`
///
/// Rows are decoded one at a time; only the current row is held in memory.
pub struct MessageRows {
    path: PathBuf,
    records: csv::DeserializeRecordsIntoIter<File, MessageRow>,
}

impl Iterator for MessageRows {
    type Item = Result<MessageRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|row| row.map_err(|e| SplitError::csv(&self.path, e)))
    }
}

/// Opens a `messages.csv` for row-by-row reading
///
/// A leading UTF-8 BOM is skipped by the CSV reader. Fields have no length limit.
pub fn read_messages(path: &Path) -> Result<MessageRows> {
    let file = File::open(path).map_err(|e| SplitError::io(path, e))?;
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    Ok(MessageRows { path: path.to_path_buf(), records: reader.into_deserialize() })
}

/// Case-insensitive substring search over conversation ids and titles
///
/// Each conversation is reported once, in first-seen order. Reading stops as soon as
/// `limit` hits are found, so rows past the last hit are never decoded.
pub fn find_conversations<I>(rows: I, query: &str, limit: usize) -> Result<Vec<ConversationHit>>
where
    I: IntoIterator<Item = Result<MessageRow>>,
{
    let query = query.to_lowercase();
    let mut seen = HashSet::new();
    let mut hits = Vec::new();
    if limit == 0 {
        return Ok(hits);
    }

    for row in rows {
        let row = row?;
        if seen.contains(&row.conversation_id) {
            continue;
        }
        if row.conversation_id.to_lowercase().contains(&query)
            || row.title.to_lowercase().contains(&query)
        {
            seen.insert(row.conversation_id.clone());
            hits.push(ConversationHit { conversation_id: row.conversation_id, title: row.title });
            if hits.len() >= limit {
                break;
            }
        }
    }

    Ok(hits)
}

/// All rows of one conversation, stably sorted by their `time` string
///
/// Only matching rows are kept while reading. ISO-8601 strings sort chronologically; rows
/// without a time sort first and keep their file order.
pub fn collect_conversation<I>(rows: I, conversation_id: &str) -> Result<Vec<MessageRow>>
where
    I: IntoIterator<Item = Result<MessageRow>>,
{
    let mut items = Vec::new();
    for row in rows {
        let row = row?;
        if row.conversation_id == conversation_id {
            items.push(row);
        }
    }
    items.sort_by(|a, b| a.time.cmp(&b.time));
    Ok(items)
}
