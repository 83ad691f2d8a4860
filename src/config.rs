//! Run configuration for a split.
//!
//! Every recognized option lives on [`SplitConfig`] with its default. The CLI builds one
//! value, calls [`SplitConfig::validate`] once, and hands it to
//! [`split_conversations`](crate::splitter::split_conversations).

use std::path::PathBuf;

use crate::error::{Result, SplitError};

pub const DEFAULT_INPUT: &str = "conversations.json";
pub const DEFAULT_OUT_DIR: &str = "parts";
pub const DEFAULT_MAX_RECORDS: usize = 200;
pub const DEFAULT_MAX_BYTES: &str = "50MB";

/// Upper bounds for a single part file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionLimits {
    /// Maximum number of conversations per part
    pub max_records: usize,
    /// Maximum serialized bytes per part; a single larger conversation still gets its own part
    pub max_bytes: u64,
}

impl Default for PartitionLimits {
    fn default() -> Self {
        Self { max_records: DEFAULT_MAX_RECORDS, max_bytes: 50 * 1024 * 1024 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub limits: PartitionLimits,
    pub emit_messages_csv: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            limits: PartitionLimits::default(),
            emit_messages_csv: false,
        }
    }
}

impl SplitConfig {
    /// Checks the option combination once, before any output is created
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_records == 0 {
            return Err(SplitError::InvalidConfig("max_records must be at least 1".to_string()));
        }
        if self.input.as_os_str().is_empty() {
            return Err(SplitError::InvalidConfig("input path is empty".to_string()));
        }
        if self.out_dir.as_os_str().is_empty() {
            return Err(SplitError::InvalidConfig("output directory is empty".to_string()));
        }
        Ok(())
    }
}
