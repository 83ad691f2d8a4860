use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::extract::{ConversationSummary, iso_local};
use crate::models::{Conversation, INDEX_HEADER, IndexRow};
use crate::output::CsvTable;
use crate::partition::Placement;

pub const INDEX_FILE_NAME: &str = "index.csv";

/// Writer for `index.csv`, one row per conversation
pub struct IndexWriter {
    table: CsvTable,
}

impl IndexWriter {
    pub fn create(out_dir: &Path) -> Result<Self> {
        Ok(Self { table: CsvTable::create(&out_dir.join(INDEX_FILE_NAME), &INDEX_HEADER)? })
    }

    /// Appends the row for `conversation`, naming the part file from `placement`
    ///
    /// Must be called right after the partitioner placed the conversation.
    pub fn append(
        &mut self,
        conversation: &Conversation,
        summary: &ConversationSummary,
        placement: &Placement,
    ) -> Result<IndexRow> {
        let row = IndexRow {
            conversation_id: conversation.id_cell(),
            title: conversation.title_cell(),
            messages: summary.message_count,
            first_time: summary.first_time.and_then(iso_local).unwrap_or_default(),
            last_time: summary.last_time.and_then(iso_local).unwrap_or_default(),
            part_file: placement.part_file.clone(),
        };
        self.table.append(&row)?;
        Ok(row)
    }

    pub fn rows(&self) -> usize {
        self.table.rows()
    }

    pub fn finish(self) -> Result<PathBuf> {
        self.table.finish()
    }
}
