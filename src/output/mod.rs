//! CSV outputs of a split: `index.csv` and the optional `messages.csv`
//!
//! Both files start with a UTF-8 byte-order mark so spreadsheet tools pick the right
//! encoding, then a fixed header row. Rows are appended as conversations are processed and
//! never rewritten. The underlying `csv::Writer` flushes on drop, so rows already appended
//! survive a fatal error later in the run.

pub mod csv_table;
pub mod index;
pub mod messages;

pub use csv_table::{CsvTable, UTF8_BOM};
pub use index::{INDEX_FILE_NAME, IndexWriter};
pub use messages::{MESSAGES_FILE_NAME, MessagesWriter};
