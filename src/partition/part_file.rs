//! Part file naming and writing

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::buffer::Batch;
use crate::error::{Result, SplitError};

pub const PART_FILE_PREFIX: &str = "conversations_part_";
pub const PART_FILE_SUFFIX: &str = ".json";

/// A part file that has been written and moved into place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartFile {
    pub part_idx: u32,
    pub path: PathBuf,
    pub records: usize,
    /// Size of the file on disk
    pub bytes: u64,
}

/// File name of part `part_idx`: `conversations_part_001.json`, `conversations_part_002.json`, ...
pub fn part_file_name(part_idx: u32) -> String {
    format!("{}{:03}{}", PART_FILE_PREFIX, part_idx, PART_FILE_SUFFIX)
}

/// Whether `name` looks like a part file produced by [`part_file_name`]
pub fn is_part_file_name(name: &str) -> bool {
    name.strip_prefix(PART_FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(PART_FILE_SUFFIX))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Writes `batch` as a JSON array into `out_dir`
///
/// The text goes to a `.tmp` sibling first and is renamed into place once complete, so a
/// part file that exists is never truncated.
pub fn write_part(out_dir: &Path, batch: &Batch) -> Result<PartFile> {
    let path = out_dir.join(part_file_name(batch.part_idx));
    let temp_path = out_dir.join(format!("{}.tmp", part_file_name(batch.part_idx)));

    let file = File::create(&temp_path).map_err(|e| SplitError::io(&temp_path, e))?;
    let mut writer = BufWriter::new(file);
    let bytes = write_array(&mut writer, batch).map_err(|e| SplitError::io(&temp_path, e))?;
    writer.flush().map_err(|e| SplitError::io(&temp_path, e))?;
    drop(writer);

    fs::rename(&temp_path, &path).map_err(|e| SplitError::io(&path, e))?;

    Ok(PartFile { part_idx: batch.part_idx, path, records: batch.records.len(), bytes })
}

fn write_array<W: Write>(writer: &mut W, batch: &Batch) -> std::io::Result<u64> {
    let mut written = 0u64;
    writer.write_all(b"[")?;
    written += 1;

    for (i, record) in batch.records.iter().enumerate() {
        if i > 0 {
            writer.write_all(b",")?;
            written += 1;
        }
        let text = escape_line_separators(&record.json);
        writer.write_all(text.as_bytes())?;
        written += text.len() as u64;
    }

    writer.write_all(b"]")?;
    Ok(written + 1)
}

/// Replaces literal U+2028 and U+2029 with their `\u` escapes
///
/// Both are legal inside JSON strings, but many editors flag them as unusual line
/// terminators. Outside strings they cannot occur in serializer output, so a plain text
/// replacement is safe.
pub fn escape_line_separators(json: &str) -> Cow<'_, str> {
    if !json.contains(['\u{2028}', '\u{2029}']) {
        return Cow::Borrowed(json);
    }
    Cow::Owned(json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029"))
}
