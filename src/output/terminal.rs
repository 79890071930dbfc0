//! Numbered terminal table of duplicate rows.
//!
//! # Format
//!
//! ```text
//!  Row  | Data
//!   1   | a,1
//!   3   | a,3
//! ```
//!
//! The row number is the 1-based line number in the input file. With a header row
//! configured, the header text replaces `Data`.

use std::io::{self, Write};

use yansi::Paint;

use crate::duplicates::RowSink;
use crate::scanner::RawRow;

/// Writes duplicate rows as a numbered table.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    /// Create a sink over any writer, usually a locked stdout.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the sink and return the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RowSink for TerminalSink<W> {
    fn begin(&mut self, header: Option<&RawRow>) -> io::Result<()> {
        let label = header.map_or_else(|| "Data".to_string(), RawRow::display_text);
        let heading = format!("{:^6}| {}", "Row", label);
        writeln!(self.out, "{}", heading.bold())
    }

    fn emit(&mut self, row: &RawRow) -> io::Result<()> {
        writeln!(self.out, "{:^6}| {}", row.line, row.display_text())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
