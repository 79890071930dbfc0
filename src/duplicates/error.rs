//! Errors and running totals shared by the scan and report passes.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::ExitCode;

/// Row and duplicate counts reached by a pass.
///
/// Carried by every [`DupeError`] so the user always sees how far
/// processing got before it stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanTotals {
    /// Rows processed so far
    pub rows_checked: u64,
    /// Distinct values seen more than once
    pub duplicates_found: u64,
}

impl fmt::Display for ScanTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rows Checked: {}\nDuplicate Entries: {}",
            self.rows_checked, self.duplicates_found
        )
    }
}

/// Errors that abort a scan or report pass.
#[derive(thiserror::Error, Debug)]
pub enum DupeError {
    /// The requested column does not exist in a row.
    #[error("{}", malformed_row_message(.line, .column, .fields, .totals))]
    MalformedRow {
        /// 1-based line number of the offending row
        line: u64,
        /// Requested zero-based column
        column: usize,
        /// Number of fields the row actually has
        fields: usize,
        /// Totals at the moment of failure
        totals: ScanTotals,
    },

    /// The output file already exists.
    #[error("'{}' already exists, please specify a unique filename", .0.display())]
    OutputAlreadyExists(PathBuf),

    /// The pass was interrupted by the user (Ctrl+C).
    #[error("Keyboard Interrupt. Exiting...")]
    Interrupted {
        /// Totals at the moment of interruption
        totals: ScanTotals,
    },

    /// A file could not be opened or created.
    #[error("I/O error for {path}: {source}")]
    Open {
        /// File that failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Reading the input failed part way through.
    #[error("Failed to read line {line}: {source}")]
    Read {
        /// 1-based line being read
        line: u64,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing duplicate rows failed.
    #[error("Failed to write duplicate rows: {0}")]
    Write(#[source] io::Error),
}

fn malformed_row_message(
    line: &u64,
    column: &usize,
    fields: &usize,
    totals: &ScanTotals,
) -> String {
    if totals.rows_checked == 0 {
        format!(
            "INDEX ERROR: check column arg vs number of columns \
             (column {column} requested, line {line} has {fields} field(s))"
        )
    } else {
        format!(
            "INDEX ERROR: check row {line} \
             (column {column} requested, row has {fields} field(s))"
        )
    }
}

impl DupeError {
    /// Best-available totals at the point the error occurred.
    #[must_use]
    pub fn totals(&self) -> ScanTotals {
        match self {
            Self::MalformedRow { totals, .. } | Self::Interrupted { totals } => *totals,
            _ => ScanTotals::default(),
        }
    }

    /// Exit code the process should terminate with.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::MalformedRow { .. } => ExitCode::MalformedRow,
            Self::OutputAlreadyExists(_) => ExitCode::OutputExists,
            Self::Interrupted { .. } => ExitCode::Interrupted,
            Self::Open { .. } | Self::Read { .. } | Self::Write(_) => ExitCode::GeneralError,
        }
    }
}
