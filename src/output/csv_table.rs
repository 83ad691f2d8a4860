use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SplitError};

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// BOM-prefixed CSV file with a fixed header
pub struct CsvTable {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
}

impl CsvTable {
    /// Creates (or truncates) `path`, writing the BOM and `header`
    pub fn create(path: &Path, header: &[&str]) -> Result<Self> {
        let mut file = File::create(path).map_err(|e| SplitError::io(path, e))?;
        file.write_all(UTF8_BOM).map_err(|e| SplitError::io(path, e))?;

        // The header is written by hand so that a table with no rows still has one
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(header).map_err(|e| SplitError::csv(path, e))?;

        Ok(Self { path: path.to_path_buf(), writer, rows: 0 })
    }

    pub fn append<T: Serialize>(&mut self, row: &T) -> Result<()> {
        self.writer.serialize(row).map_err(|e| SplitError::csv(&self.path, e))?;
        self.rows += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows appended so far, header excluded
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush().map_err(|e| SplitError::io(&self.path, e))?;
        Ok(self.path)
    }
}
