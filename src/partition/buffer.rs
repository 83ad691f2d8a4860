use crate::config::PartitionLimits;
use crate::error::Result;
use crate::models::Conversation;

/// A conversation serialized once for both measuring and writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedConversation {
    /// `id` as a CSV cell, empty when absent
    pub id: String,
    /// Compact, non-ASCII-escaped JSON text
    pub json: String,
}

impl EncodedConversation {
    pub fn encode(conversation: &Conversation) -> Result<Self> {
        Ok(Self { id: conversation.id_cell(), json: conversation.to_json()? })
    }

    /// UTF-8 byte length of the serialized record
    pub fn byte_len(&self) -> u64 {
        self.json.len() as u64
    }
}

/// Conversations taken out of the buffer by a flush, ready to be written as one part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub part_idx: u32,
    pub records: Vec<EncodedConversation>,
    /// Sum of the records' serialized sizes
    pub bytes: u64,
}

/// Accumulation state between flushes
///
/// `part_idx` is the 1-based index of the part the buffered records will be written to.
/// It only moves forward, by one, each time a non-empty batch is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionBuffer {
    records: Vec<EncodedConversation>,
    cur_bytes: u64,
    part_idx: u32,
}

impl PartitionBuffer {
    pub fn new() -> Self {
        Self { records: Vec::new(), cur_bytes: 0, part_idx: 1 }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cur_bytes(&self) -> u64 {
        self.cur_bytes
    }

    pub fn part_idx(&self) -> u32 {
        self.part_idx
    }

    /// Whether the current batch must be flushed before a record of `incoming_bytes` joins
    ///
    /// An empty buffer is never flushed, so the first record of every part is always
    /// accepted, however large it is.
    pub fn needs_flush_before(&self, incoming_bytes: u64, limits: &PartitionLimits) -> bool {
        !self.is_empty()
            && (self.records.len() >= limits.max_records
                || self.cur_bytes.saturating_add(incoming_bytes) > limits.max_bytes)
    }

    pub fn push(&mut self, record: EncodedConversation) {
        self.cur_bytes += record.byte_len();
        self.records.push(record);
    }

    /// Empties the buffer and advances to the next part index
    ///
    /// Returns `None`, and leaves the index alone, when there is nothing to flush.
    pub fn take_batch(&mut self) -> Option<Batch> {
        if self.is_empty() {
            return None;
        }

        let batch = Batch {
            part_idx: self.part_idx,
            records: std::mem::take(&mut self.records),
            bytes: std::mem::replace(&mut self.cur_bytes, 0),
        };
        self.part_idx += 1;
        Some(batch)
    }
}

impl Default for PartitionBuffer {
    fn default() -> Self {
        Self::new()
    }
}
