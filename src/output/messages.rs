use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{MESSAGES_HEADER, MessageRow};
use crate::output::CsvTable;

pub const MESSAGES_FILE_NAME: &str = "messages.csv";

/// Writer for `messages.csv`, one row per user/assistant message
pub struct MessagesWriter {
    table: CsvTable,
}

impl MessagesWriter {
    pub fn create(out_dir: &Path) -> Result<Self> {
        Ok(Self { table: CsvTable::create(&out_dir.join(MESSAGES_FILE_NAME), &MESSAGES_HEADER)? })
    }

    pub fn append_all(&mut self, rows: &[MessageRow]) -> Result<()> {
        rows.iter().try_for_each(|row| self.table.append(row))
    }

    pub fn rows(&self) -> usize {
        self.table.rows()
    }

    pub fn finish(self) -> Result<PathBuf> {
        self.table.finish()
    }
}
