//! Duplicate reporter: the second pass over the input.
//!
//! The reporter re-reads the input in order and hands every row whose key value is
//! in the scan's duplicate set to a [`RowSink`]. Rows are passed through as raw
//! bytes, so a file destination receives them byte-for-byte.
//!
//! Every occurrence of a duplicated value is emitted, the first one included.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::error::{DupeError, ScanTotals};
use super::finder::{ScanConfig, ScanResult};
use crate::output::{FileSink, TerminalSink};
use crate::scanner::{RawRow, RowReader};

/// Destination for emitted duplicate rows.
pub trait RowSink {
    /// Called once before the first row, with the header row if one is configured.
    fn begin(&mut self, header: Option<&RawRow>) -> io::Result<()>;

    /// Called for each duplicate row, in input order.
    fn emit(&mut self, row: &RawRow) -> io::Result<()>;

    /// Called once after the last row.
    fn finish(&mut self) -> io::Result<()>;
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn begin(&mut self, header: Option<&RawRow>) -> io::Result<()> {
        (**self).begin(header)
    }

    fn emit(&mut self, row: &RawRow) -> io::Result<()> {
        (**self).emit(row)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}

/// Where the CLI sends duplicate rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Numbered table on stdout
    Terminal,
    /// Verbatim rows in a new file
    File(PathBuf),
}

/// What a report pass produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The duplicate set was empty; nothing was opened or written.
    NoDuplicates,
    /// Rows were emitted.
    Emitted {
        /// Data rows read during the pass
        rows_read: u64,
        /// Rows handed to the sink
        rows_emitted: u64,
    },
}

/// Second-pass extractor of duplicate rows.
#[derive(Debug, Clone)]
pub struct DuplicateReporter {
    config: ScanConfig,
}

impl DuplicateReporter {
    /// Create a reporter. Use the same configuration the scan ran with.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Fail if shutdown was requested after the scan finished.
    fn check_interrupt(&self, scan: &ScanResult) -> Result<(), DupeError> {
        if self.config.is_shutdown_requested() {
            log::info!("Interrupted before extracting duplicates");
            return Err(DupeError::Interrupted {
                totals: scan.totals(),
            });
        }
        Ok(())
    }

    /// Report duplicates of `path` to a CLI destination.
    ///
    /// With no duplicates, returns [`ReportOutcome::NoDuplicates`] without
    /// creating the output file.
    ///
    /// # Errors
    ///
    /// - [`DupeError::OutputAlreadyExists`] if the destination file appeared
    ///   since the pre-flight check
    /// - Any error from [`report_to`](Self::report_to)
    pub fn report(
        &self,
        path: &Path,
        scan: &ScanResult,
        destination: &Destination,
    ) -> Result<ReportOutcome, DupeError> {
        self.check_interrupt(scan)?;
        if !scan.has_duplicates() {
            log::info!("No duplicate values, nothing to report");
            return Ok(ReportOutcome::NoDuplicates);
        }

        match destination {
            Destination::Terminal => {
                let stdout = io::stdout();
                self.report_to(path, scan, TerminalSink::new(stdout.lock()))
            }
            Destination::File(out) => {
                let sink = FileSink::create(out)?;
                self.report_to(path, scan, sink)
            }
        }
    }

    /// Report duplicates of `path` into any sink.
    ///
    /// # Errors
    ///
    /// - [`DupeError::Open`] if the input cannot be opened
    /// - [`DupeError::MalformedRow`] if a row lacks the configured column
    /// - [`DupeError::Interrupted`] if shutdown was requested
    /// - [`DupeError::Read`] / [`DupeError::Write`] on I/O failure
    pub fn report_to<S: RowSink>(
        &self,
        path: &Path,
        scan: &ScanResult,
        sink: S,
    ) -> Result<ReportOutcome, DupeError> {
        self.check_interrupt(scan)?;
        if !scan.has_duplicates() {
            return Ok(ReportOutcome::NoDuplicates);
        }

        let file = File::open(path).map_err(|source| DupeError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Extracting duplicate rows from {}", path.display());

        self.report_reader(BufReader::new(file), scan, sink)
    }

    /// Report duplicates read from any buffered reader into any sink.
    ///
    /// # Errors
    ///
    /// Same as [`report_to`](Self::report_to), minus the open failure.
    pub fn report_reader<R: BufRead, S: RowSink>(
        &self,
        reader: R,
        scan: &ScanResult,
        mut sink: S,
    ) -> Result<ReportOutcome, DupeError> {
        self.check_interrupt(scan)?;
        if !scan.has_duplicates() {
            return Ok(ReportOutcome::NoDuplicates);
        }

        let mut rows = RowReader::new(reader);
        let mut totals = ScanTotals {
            rows_checked: 0,
            duplicates_found: scan.duplicate_count(),
        };

        let header = if self.config.header {
            rows.next()
                .transpose()
                .map_err(|source| DupeError::Read { line: 1, source })?
        } else {
            None
        };
        sink.begin(header.as_ref()).map_err(DupeError::Write)?;

        let mut emitted = 0;
        while let Some(row) = rows.next() {
            if self.config.is_shutdown_requested() {
                log::info!("Report interrupted after {} rows", totals.rows_checked);
                return Err(DupeError::Interrupted { totals });
            }

            let row = row.map_err(|source| DupeError::Read {
                line: rows.lines_read() + 1,
                source,
            })?;

            let value = self.config.key_of(&row, totals)?;
            totals.rows_checked += 1;

            if scan.is_duplicate(value) {
                sink.emit(&row).map_err(DupeError::Write)?;
                emitted += 1;
            }
        }

        sink.finish().map_err(DupeError::Write)?;
        log::info!(
            "Report complete: {} of {} rows emitted",
            emitted,
            totals.rows_checked
        );

        Ok(ReportOutcome::Emitted {
            rows_read: totals.rows_checked,
            rows_emitted: emitted,
        })
    }
}
