//! Streaming input parsing for conversation exports
//!
//! # Error Handling Strategy
//!
//! Unlike line-oriented formats, a single JSON array cannot be resynchronized after a bad
//! element, so this module is **fail-fast**:
//!
//! - **Structural errors** from [`ArrayScanner`] (missing `[`, unterminated object, stray
//!   characters) end the run immediately.
//! - **Decode errors** from [`decode_span`] end the run as well. The error keeps a 200
//!   character snippet of the offending element so it can be located in the input.
//! - **Partial output** already written before the failure is left on disk.
//!
//! Errors are typed ([`SplitError`](crate::error::SplitError)) so callers and tests can
//! match on the failure kind; the binary wraps them in `anyhow` for reporting.

pub mod array_scanner;
pub mod decoder;

pub use array_scanner::{ArrayScanner, RawSpan};
pub use decoder::decode_span;
