//! Line-oriented row reading for delimited text files.
//!
//! # Overview
//!
//! Rows are read as raw bytes so that a row can be written back out exactly as it
//! appeared in the input, line ending included. Fields are byte slices of the line
//! with trailing whitespace removed, so keys compare byte-for-byte even when the
//! input is not valid UTF-8. Lossy UTF-8 conversion is only used for display.
//!
//! No quoting is understood: a delimiter inside a field value is indistinguishable
//! from a field separator.

use std::borrow::Cow;
use std::io::{self, BufRead};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// A single input line together with its position in the file.
///
/// Only trailing whitespace (the line ending included) is stripped before
/// splitting. Leading whitespace belongs to the first field, so `" a,1"` keys as
/// `" a"` on column 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based physical line number
    pub line: u64,
    /// Line bytes exactly as read, including the trailing newline if present
    pub bytes: Vec<u8>,
}

impl RawRow {
    /// Create a row from a line number and its raw bytes.
    #[must_use]
    pub fn new(line: u64, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            line,
            bytes: bytes.into(),
        }
    }

    /// The line as text, invalid UTF-8 replaced.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// The line with its line ending and other trailing whitespace removed.
    #[must_use]
    pub fn display_text(&self) -> String {
        self.text().trim_end().to_string()
    }

    /// The raw line with trailing whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &[u8] {
        trim_end_bytes(&self.bytes)
    }

    /// Extract the field at `column`, or `None` if the row is too short.
    #[must_use]
    pub fn field(&self, column: usize, delimiter: char) -> Option<&[u8]> {
        split_field(self.trimmed(), column, delimiter)
    }

    /// Number of fields in the row.
    #[must_use]
    pub fn field_count(&self, delimiter: char) -> usize {
        Fields::new(self.trimmed(), delimiter).count()
    }
}

/// Return the `column`-th field of an already trimmed line.
///
/// An empty line has exactly one (empty) field.
///
/// # Examples
///
/// ```
/// use csvdupe::scanner::split_field;
///
/// assert_eq!(split_field(b"a,b,c", 1, ','), Some(&b"b"[..]));
/// assert_eq!(split_field(b"a,b,c", 3, ','), None);
/// assert_eq!(split_field(b"", 0, ','), Some(&b""[..]));
/// ```
#[must_use]
pub fn split_field(line: &[u8], column: usize, delimiter: char) -> Option<&[u8]> {
    Fields::new(line, delimiter).nth(column)
}

/// Strip trailing ASCII whitespace and trailing whitespace chars encoded as UTF-8.
fn trim_end_bytes(mut bytes: &[u8]) -> &[u8] {
    loop {
        let trimmed = bytes.trim_ascii_end();
        if trimmed.len() != bytes.len() {
            bytes = trimmed;
            continue;
        }
        // Multi-byte whitespace such as U+00A0 or U+3000
        let tail = (2..=bytes.len().min(4)).find_map(|width| {
            let start = bytes.len() - width;
            std::str::from_utf8(&bytes[start..])
                .ok()
                .and_then(|s| s.chars().next())
                .filter(|c| c.len_utf8() == width && c.is_whitespace())
                .map(|_| start)
        });
        match tail {
            Some(start) => bytes = &bytes[..start],
            None => return bytes,
        }
    }
}

/// Iterator over the fields of a line, split on the UTF-8 encoding of a delimiter.
struct Fields<'a> {
    rest: Option<&'a [u8]>,
    delimiter: [u8; 4],
    width: usize,
}

impl<'a> Fields<'a> {
    fn new(line: &'a [u8], delimiter: char) -> Self {
        let mut buf = [0; 4];
        let width = delimiter.encode_utf8(&mut buf).len();
        Self {
            rest: Some(line),
            delimiter: buf,
            width,
        }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        let delimiter = &self.delimiter[..self.width];
        match rest.windows(self.width).position(|w| w == delimiter) {
            Some(at) => {
                self.rest = Some(&rest[at + self.width..]);
                Some(&rest[..at])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Iterator over the lines of a buffered reader as [`RawRow`]s.
///
/// A final line without a trailing newline is still yielded; an empty input
/// yields nothing.
#[derive(Debug)]
pub struct RowReader<R> {
    inner: R,
    lines_read: u64,
}

impl<R: BufRead> RowReader<R> {
    /// Wrap a buffered reader.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            lines_read: 0,
        }
    }

    /// Number of lines yielded so far.
    #[must_use]
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = io::Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut bytes = Vec::new();
        match self.inner.read_until(b'\n', &mut bytes) {
            Ok(0) => None,
            Ok(_) => {
                self.lines_read += 1;
                Some(Ok(RawRow::new(self.lines_read, bytes)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
