//! Size- and count-bounded partitioning of conversations into part files
//!
//! [`Partitioner`] owns the only mutable state of a run, a [`PartitionBuffer`]. For every
//! conversation it:
//!
//! 1. measures the serialized record,
//! 2. flushes the pending batch if the record would push it past `max_records` or
//!    `max_bytes` (an empty batch is never flushed),
//! 3. appends the record, even when it alone is larger than `max_bytes`,
//! 4. warns about such oversized records,
//! 5. returns a [`Placement`] naming the part file the record will land in.
//!
//! Because the flush decision happens before the append, the part index in the returned
//! placement is final: later records can only flush this batch under this index, never move
//! it. The index writer relies on that to name the right file for each row.

pub mod buffer;
pub mod part_file;

use std::path::{Path, PathBuf};

pub use buffer::{Batch, EncodedConversation, PartitionBuffer};
pub use part_file::{PartFile, is_part_file_name, part_file_name, write_part};
use tracing::{debug, info, warn};

use crate::config::PartitionLimits;
use crate::error::Result;
use crate::models::Conversation;
use crate::utils::format_megabytes;

/// Where one conversation was placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub part_idx: u32,
    pub part_file: String,
    /// Serialized size of the conversation
    pub bytes: u64,
    /// The conversation alone is larger than `max_bytes`
    pub oversized: bool,
}

pub struct Partitioner {
    out_dir: PathBuf,
    limits: PartitionLimits,
    buffer: PartitionBuffer,
    written: Vec<PartFile>,
}

impl Partitioner {
    pub fn new(out_dir: &Path, limits: PartitionLimits) -> Self {
        Self { out_dir: out_dir.to_path_buf(), limits, buffer: PartitionBuffer::new(), written: Vec::new() }
    }

    /// Takes one conversation, flushing the previous batch first when needed
    pub fn accept(&mut self, conversation: &Conversation) -> Result<Placement> {
        let record = EncodedConversation::encode(conversation)?;
        let bytes = record.byte_len();

        if self.buffer.needs_flush_before(bytes, &self.limits) {
            self.flush()?;
        }

        let oversized = bytes > self.limits.max_bytes;
        if oversized {
            warn!(
                conversation = %short_id(&record.id),
                size = %format_megabytes(bytes),
                max_bytes = self.limits.max_bytes,
                "Conversation {} ({}) exceeds max_bytes limit",
                short_id(&record.id),
                format_megabytes(bytes)
            );
        }

        self.buffer.push(record);

        let part_idx = self.buffer.part_idx();
        debug!(part_idx, bytes, pending = self.buffer.len(), "conversation placed");
        Ok(Placement { part_idx, part_file: part_file_name(part_idx), bytes, oversized })
    }

    /// Part files written so far
    pub fn written(&self) -> &[PartFile] {
        &self.written
    }

    /// Flushes whatever is still buffered and returns every part file written
    pub fn finish(mut self) -> Result<Vec<PartFile>> {
        self.flush()?;
        Ok(self.written)
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(batch) = self.buffer.take_batch() {
            let part = write_part(&self.out_dir, &batch)?;
            info!(
                file = %part.path.display(),
                records = part.records,
                bytes = part.bytes,
                "wrote part file"
            );
            self.written.push(part);
        }
        Ok(())
    }
}

/// First 8 characters of an id, or `unknown`
fn short_id(id: &str) -> String {
    if id.is_empty() { "unknown".to_string() } else { id.chars().take(8).collect() }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::{Value, json};
    use tempfile::TempDir;

    use super::*;

    fn conversation(id: &str, title_len: usize) -> Conversation {
        Conversation::from_value(json!({"id": id, "title": "T".repeat(title_len), "mapping": {}}))
    }

    fn read_ids(path: &Path) -> Vec<String> {
        let parsed: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        parsed
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_first_record_goes_to_part_one() {
        let dir = TempDir::new().unwrap();
        let mut partitioner = Partitioner::new(dir.path(), PartitionLimits::default());

        let placement = partitioner.accept(&conversation("a", 10)).unwrap();
        assert_eq!(placement.part_idx, 1);
        assert_eq!(placement.part_file, "conversations_part_001.json");
        assert!(!placement.oversized);
        assert!(partitioner.written().is_empty());
    }

    #[test]
    fn test_flush_before_add_keeps_index_in_step() {
        // ~1000 and ~2000 byte records with a 1500 byte limit
        let dir = TempDir::new().unwrap();
        let limits = PartitionLimits { max_records: 100, max_bytes: 1500 };
        let mut partitioner = Partitioner::new(dir.path(), limits);

        let first = partitioner.accept(&conversation("conv-1", 1000)).unwrap();
        let second = partitioner.accept(&conversation("conv-2", 2000)).unwrap();
        assert_eq!(first.part_file, "conversations_part_001.json");
        assert_eq!(second.part_file, "conversations_part_002.json");
        assert!(second.oversized);

        let parts = partitioner.finish().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(read_ids(&parts[0].path), vec!["conv-1"]);
        assert_eq!(read_ids(&parts[1].path), vec!["conv-2"]);
    }

    #[test]
    fn test_record_count_limit() {
        let dir = TempDir::new().unwrap();
        let limits = PartitionLimits { max_records: 2, max_bytes: u64::MAX };
        let mut partitioner = Partitioner::new(dir.path(), limits);

        let files: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| partitioner.accept(&conversation(id, 5)).unwrap().part_file)
            .collect();
        assert_eq!(
            files,
            vec![
                "conversations_part_001.json",
                "conversations_part_001.json",
                "conversations_part_002.json",
                "conversations_part_002.json",
                "conversations_part_003.json",
            ]
        );

        let parts = partitioner.finish().unwrap();
        assert_eq!(parts.iter().map(|p| p.records).collect::<Vec<_>>(), vec![2, 2, 1]);
    }

    #[test]
    fn test_exact_byte_fit_stays_in_same_part() {
        let dir = TempDir::new().unwrap();
        let a = conversation("a", 50);
        let b = conversation("b", 70);
        let exact = EncodedConversation::encode(&a).unwrap().byte_len()
            + EncodedConversation::encode(&b).unwrap().byte_len();

        let limits = PartitionLimits { max_records: 10, max_bytes: exact };
        let mut partitioner = Partitioner::new(dir.path(), limits);
        partitioner.accept(&a).unwrap();
        let placement = partitioner.accept(&b).unwrap();
        assert_eq!(placement.part_idx, 1);

        let limits = PartitionLimits { max_records: 10, max_bytes: exact - 1 };
        let mut partitioner = Partitioner::new(dir.path(), limits);
        partitioner.accept(&a).unwrap();
        let placement = partitioner.accept(&b).unwrap();
        assert_eq!(placement.part_idx, 2);
    }

    #[test]
    fn test_oversized_record_between_small_ones_is_isolated() {
        let dir = TempDir::new().unwrap();
        let limits = PartitionLimits { max_records: 10, max_bytes: 500 };
        let mut partitioner = Partitioner::new(dir.path(), limits);

        let small_1 = partitioner.accept(&conversation("small-1", 10)).unwrap();
        let huge = partitioner.accept(&conversation("huge", 3000)).unwrap();
        let small_2 = partitioner.accept(&conversation("small-2", 10)).unwrap();

        assert_eq!((small_1.part_idx, huge.part_idx, small_2.part_idx), (1, 2, 3));
        assert!(huge.oversized);

        let parts = partitioner.finish().unwrap();
        assert_eq!(read_ids(&parts[1].path), vec!["huge"]);
    }

    #[test]
    fn test_zero_max_bytes_puts_every_record_alone() {
        let dir = TempDir::new().unwrap();
        let limits = PartitionLimits { max_records: 10, max_bytes: 0 };
        let mut partitioner = Partitioner::new(dir.path(), limits);
        for id in ["a", "b", "c"] {
            assert!(partitioner.accept(&conversation(id, 1)).unwrap().oversized);
        }
        assert_eq!(partitioner.finish().unwrap().len(), 3);
    }

    #[test]
    fn test_finish_without_records_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let partitioner = Partitioner::new(dir.path(), PartitionLimits::default());
        assert!(partitioner.finish().unwrap().is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id(""), "unknown");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("6543a1b2-0000-4000-8000-000000000000"), "6543a1b2");
    }
}
