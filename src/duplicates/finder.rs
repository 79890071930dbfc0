//! Duplicate scanner: the first pass over the input.
//!
//! # Overview
//!
//! The scanner reads the input once, in order, and partitions the values found in
//! the configured column into a *seen* set and a *duplicate* set. A value moves into
//! the duplicate set the first time it reappears; later repeats leave the set
//! unchanged.
//!
//! The result is an explicit [`ScanResult`] value that the
//! [`DuplicateReporter`](super::DuplicateReporter) consumes read-only.
//!
//! # Example
//!
//! ```no_run
//! use csvdupe::duplicates::{DuplicateScanner, ScanConfig};
//! use std::path::Path;
//!
//! let scanner = DuplicateScanner::new(ScanConfig::new(0));
//! let result = scanner.scan(Path::new("people.csv")).unwrap();
//!
//! println!("{} rows, {} duplicate values", result.rows_checked(), result.duplicate_count());
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytesize::ByteSize;

use super::error::{DupeError, ScanTotals};
use crate::progress::ProgressObserver;
use crate::scanner::{RawRow, RowReader, DEFAULT_DELIMITER};

/// Settings shared by the scan and report passes.
#[derive(Clone)]
pub struct ScanConfig {
    /// Zero-based column used as the duplicate key.
    pub column: usize,
    /// Field delimiter.
    pub delimiter: char,
    /// Treat the first line as a header and exclude it from detection.
    pub header: bool,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress observer, notified after every scanned row.
    pub progress: Option<Arc<dyn ProgressObserver>>,
}

impl std::fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanConfig")
            .field("column", &self.column)
            .field("delimiter", &self.delimiter)
            .field("header", &self.header)
            .field("shutdown_flag", &self.shutdown_flag)
            .field("progress", &self.progress.as_ref().map(|_| "<observer>"))
            .finish()
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            column: 0,
            delimiter: DEFAULT_DELIMITER,
            header: false,
            shutdown_flag: None,
            progress: None,
        }
    }
}

impl ScanConfig {
    /// Create a configuration keyed on `column`.
    #[must_use]
    pub fn new(column: usize) -> Self {
        Self {
            column,
            ..Self::default()
        }
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Skip the first line as a header.
    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress observer.
    #[must_use]
    pub fn with_progress(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.progress = Some(observer);
        self
    }

    /// Check if shutdown has been requested.
    pub(crate) fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Extract the key column from `row` as raw bytes.
    pub(crate) fn key_of<'r>(
        &self,
        row: &'r RawRow,
        totals: ScanTotals,
    ) -> Result<&'r [u8], DupeError> {
        row.field(self.column, self.delimiter).ok_or_else(|| {
            let fields = row.field_count(self.delimiter);
            log::warn!(
                "Line {} has {} field(s) but column {} was requested",
                row.line,
                fields,
                self.column
            );
            DupeError::MalformedRow {
                line: row.line,
                column: self.column,
                fields,
                totals,
            }
        })
    }
}

/// Outcome of a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    rows_checked: u64,
    seen: HashSet<Vec<u8>>,
    duplicates: HashSet<Vec<u8>>,
}

impl ScanResult {
    /// Record one row's key value.
    fn record(&mut self, value: &[u8]) {
        self.rows_checked += 1;
        if self.seen.contains(value) {
            if !self.duplicates.contains(value) {
                self.duplicates.insert(value.to_vec());
            }
        } else {
            self.seen.insert(value.to_vec());
        }
    }

    /// Number of data rows read (the header, if skipped, is not counted).
    #[must_use]
    pub fn rows_checked(&self) -> u64 {
        self.rows_checked
    }

    /// Number of distinct values that occurred two or more times.
    #[must_use]
    pub fn duplicate_count(&self) -> u64 {
        self.duplicates.len() as u64
    }

    /// Number of distinct values seen.
    #[must_use]
    pub fn distinct_count(&self) -> usize {
        self.seen.len()
    }

    /// Whether any value repeated.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    /// Whether `value` occurred more than once.
    ///
    /// Values compare as raw bytes, so two keys differing only in invalid UTF-8
    /// are distinct.
    #[must_use]
    pub fn is_duplicate(&self, value: impl AsRef<[u8]>) -> bool {
        self.duplicates.contains(value.as_ref())
    }

    /// The duplicate-value set.
    #[must_use]
    pub fn duplicates(&self) -> &HashSet<Vec<u8>> {
        &self.duplicates
    }

    /// Totals for display.
    #[must_use]
    pub fn totals(&self) -> ScanTotals {
        ScanTotals {
            rows_checked: self.rows_checked,
            duplicates_found: self.duplicate_count(),
        }
    }
}

/// Single-pass duplicate scanner.
#[derive(Debug, Clone)]
pub struct DuplicateScanner {
    config: ScanConfig,
}

impl DuplicateScanner {
    /// Create a scanner with the given configuration.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan the file at `path`.
    ///
    /// # Errors
    ///
    /// - [`DupeError::Open`] if the file cannot be opened
    /// - [`DupeError::MalformedRow`] if a row lacks the configured column
    /// - [`DupeError::Interrupted`] if shutdown was requested
    /// - [`DupeError::Read`] if reading fails part way through
    pub fn scan(&self, path: &Path) -> Result<ScanResult, DupeError> {
        let file = File::open(path).map_err(|source| DupeError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        match file.metadata() {
            Ok(meta) => log::info!(
                "Scanning {} ({}) on column {}",
                path.display(),
                ByteSize::b(meta.len()),
                self.config.column
            ),
            Err(_) => log::info!(
                "Scanning {} on column {}",
                path.display(),
                self.config.column
            ),
        }

        self.scan_reader(BufReader::new(file))
    }

    /// Scan rows from any buffered reader.
    ///
    /// # Errors
    ///
    /// Same as [`scan`](Self::scan), minus the open failure.
    pub fn scan_reader<R: BufRead>(&self, reader: R) -> Result<ScanResult, DupeError> {
        if let Some(ref observer) = self.config.progress {
            observer.on_scan_start();
        }

        let outcome = self.scan_rows(RowReader::new(reader));

        let totals = match &outcome {
            Ok(result) => result.totals(),
            Err(e) => e.totals(),
        };
        if let Some(ref observer) = self.config.progress {
            observer.on_scan_end(totals);
        }

        match &outcome {
            Ok(result) => log::info!(
                "Scan complete: {} rows, {} distinct values, {} duplicated",
                result.rows_checked(),
                result.distinct_count(),
                result.duplicate_count()
            ),
            Err(DupeError::Interrupted { .. }) => {
                log::info!("Scan interrupted after {} rows", totals.rows_checked);
            }
            Err(e) => log::debug!("Scan failed: {}", e),
        }

        outcome
    }

    fn scan_rows<R: BufRead>(&self, mut rows: RowReader<R>) -> Result<ScanResult, DupeError> {
        let mut result = ScanResult::default();

        if self.config.header {
            match rows.next() {
                Some(Ok(header)) => log::debug!("Skipping header: {}", header.display_text()),
                Some(Err(source)) => return Err(DupeError::Read { line: 1, source }),
                None => return Ok(result),
            }
        }

        while let Some(row) = rows.next() {
            if self.config.is_shutdown_requested() {
                return Err(DupeError::Interrupted {
                    totals: result.totals(),
                });
            }

            let row = row.map_err(|source| DupeError::Read {
                line: rows.lines_read() + 1,
                source,
            })?;

            let value = self.config.key_of(&row, result.totals())?;
            log::trace!(
                "Line {}: key {:?}",
                row.line,
                String::from_utf8_lossy(value)
            );
            result.record(value);

            if let Some(ref observer) = self.config.progress {
                observer.report_progress(result.rows_checked, result.duplicate_count());
            }
        }

        Ok(result)
    }
}
