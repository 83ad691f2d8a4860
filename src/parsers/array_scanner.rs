//! Incremental scanner over a top-level JSON array of objects
//!
//! [`ArrayScanner`] pulls one byte at a time from a buffered reader and yields the raw text
//! of each array element, braces included, without parsing it. Only string, escape and
//! brace-depth bookkeeping happens here; grammar checking is left to
//! [`decode_span`](super::decoder::decode_span).
//!
//! Working on bytes instead of chars is safe: the four bytes the state machine reacts to
//! (`{`, `}`, `"`, `\`) are ASCII and never appear inside a multi-byte UTF-8 sequence.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitError};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Raw, undecoded text of one top-level element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpan {
    /// Byte offset of the opening `{` in the input
    pub offset: u64,
    pub bytes: Vec<u8>,
}

impl RawSpan {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Lexical state inside an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InString,
    InStringEscaped,
}

/// Where the scanner stands relative to the array structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing read yet; the wrapper `[` is still to be checked
    Start,
    /// An element was emitted; a `,` or `]` comes next
    AfterElement,
    /// Closing `]` seen, or an error was returned
    Done,
}

/// Pull-based producer of [`RawSpan`]s
///
/// The iterator is finite and fused: after the closing `]` or after the first error it
/// only returns `None`. Bytes after the closing `]` are never read.
///
/// # Examples
///
/// ```
/// use conversation_splitter::parsers::ArrayScanner;
///
/// let input = br#"[ {"id":"a"}, {"id":"b","title":"{not a brace}"} ]"#;
/// let spans: Vec<_> = ArrayScanner::new(&input[..]).collect::<Result<_, _>>().unwrap();
///
/// assert_eq!(spans.len(), 2);
/// assert_eq!(spans[1].bytes, br#"{"id":"b","title":"{not a brace}"}"#);
/// ```
pub struct ArrayScanner<R> {
    bytes: io::Bytes<R>,
    source: PathBuf,
    offset: u64,
    phase: Phase,
}

impl ArrayScanner<BufReader<File>> {
    /// Opens `path` for scanning
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| SplitError::io(path, e))?;
        Ok(Self::new(BufReader::new(file)).with_source(path))
    }
}

impl<R: BufRead> ArrayScanner<R> {
    pub fn new(reader: R) -> Self {
        Self { bytes: reader.bytes(), source: PathBuf::from("<input>"), offset: 0, phase: Phase::Start }
    }

    /// Sets the path reported in I/O errors
    pub fn with_source(mut self, source: &Path) -> Self {
        self.source = source.to_path_buf();
        self
    }

    /// Number of input bytes consumed so far
    pub fn bytes_consumed(&self) -> u64 {
        self.offset
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        match self.bytes.next() {
            Some(Ok(byte)) => {
                self.offset += 1;
                Ok(Some(byte))
            }
            Some(Err(e)) => Err(SplitError::io(&self.source, e)),
            None => Ok(None),
        }
    }

    /// Skips JSON whitespace starting at `current`, returning the first other byte
    fn skip_whitespace(&mut self, mut current: Option<u8>) -> Result<Option<u8>> {
        while let Some(byte) = current {
            if !is_json_whitespace(byte) {
                break;
            }
            current = self.next_byte()?;
        }
        Ok(current)
    }

    fn next_significant(&mut self) -> Result<Option<u8>> {
        let first = self.next_byte()?;
        self.skip_whitespace(first)
    }

    /// Offset of the byte most recently returned by `next_byte`
    fn last_offset(&self) -> u64 {
        self.offset.saturating_sub(1)
    }

    fn unexpected(&self, byte: u8) -> SplitError {
        SplitError::UnexpectedCharacter { found: char::from(byte), offset: self.last_offset() }
    }

    fn unterminated(&self) -> SplitError {
        SplitError::UnterminatedObject { offset: self.offset }
    }

    /// Checks the opening `[` and returns the byte that follows it
    fn open_array(&mut self) -> Result<Option<u8>> {
        let mut first = self.next_byte()?;
        if first == Some(UTF8_BOM[0]) {
            for expected in &UTF8_BOM[1..] {
                if self.next_byte()? != Some(*expected) {
                    return Err(SplitError::MalformedWrapper {
                        found: Some(char::from(UTF8_BOM[0])),
                        offset: 0,
                    });
                }
            }
            first = self.next_byte()?;
        }

        match self.skip_whitespace(first)? {
            Some(b'[') => self.next_significant(),
            found => Err(SplitError::MalformedWrapper {
                found: found.map(char::from),
                offset: if found.is_some() { self.last_offset() } else { self.offset },
            }),
        }
    }

    /// Reads past the separator after an element and returns the byte that starts the next
    /// one, or `None` when the array is closed
    fn after_element(&mut self) -> Result<Option<u8>> {
        match self.next_significant()? {
            Some(b',') => match self.next_significant()? {
                Some(b']') => Ok(None),
                Some(byte) => Ok(Some(byte)),
                None => Err(self.unterminated()),
            },
            Some(b']') => Ok(None),
            Some(byte) => Err(self.unexpected(byte)),
            None => Err(self.unterminated()),
        }
    }

    /// Scans one object whose opening `{` has just been read
    fn scan_object(&mut self) -> Result<RawSpan> {
        let start = self.last_offset();
        let mut buf = vec![b'{'];
        let mut depth: usize = 1;
        let mut state = ScanState::Outside;

        while depth > 0 {
            let Some(byte) = self.next_byte()? else {
                return Err(self.unterminated());
            };
            buf.push(byte);

            state = match (state, byte) {
                (ScanState::Outside, b'"') => ScanState::InString,
                (ScanState::Outside, b'{') => {
                    depth += 1;
                    ScanState::Outside
                }
                (ScanState::Outside, b'}') => {
                    depth -= 1;
                    ScanState::Outside
                }
                (ScanState::Outside, _) => ScanState::Outside,
                (ScanState::InString, b'\\') => ScanState::InStringEscaped,
                (ScanState::InString, b'"') => ScanState::Outside,
                (ScanState::InString, _) => ScanState::InString,
                (ScanState::InStringEscaped, _) => ScanState::InString,
            };
        }

        Ok(RawSpan { offset: start, bytes: buf })
    }

    fn advance(&mut self) -> Result<Option<RawSpan>> {
        let next = match self.phase {
            Phase::Start => self.open_array()?,
            Phase::AfterElement => self.after_element()?,
            Phase::Done => return Ok(None),
        };

        match next {
            Some(b'{') => {
                let span = self.scan_object()?;
                self.phase = Phase::AfterElement;
                Ok(Some(span))
            }
            // `]` directly after `[`
            Some(b']') if self.phase == Phase::Start => {
                self.phase = Phase::Done;
                Ok(None)
            }
            Some(byte) => Err(self.unexpected(byte)),
            None if self.phase == Phase::Start => Err(self.unterminated()),
            None => {
                self.phase = Phase::Done;
                Ok(None)
            }
        }
    }
}

impl<R: BufRead> Iterator for ArrayScanner<R> {
    type Item = Result<RawSpan>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(Some(span)) => Some(Ok(span)),
            Ok(None) => {
                self.phase = Phase::Done;
                None
            }
            Err(e) => {
                self.phase = Phase::Done;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for ArrayScanner<R> {}

fn is_json_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}
