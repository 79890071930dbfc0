//! Structured error handling and exit codes.

use serde::Serialize;

use crate::duplicates::DupeError;

/// Exit codes for the csvdupe application.
///
/// - 0: Success (completed normally, with or without duplicates)
/// - 1: General error (unexpected failure)
/// - 2: Output file already exists
/// - 3: Malformed row (column index out of range)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: both passes completed.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// The output file already exists; nothing was read.
    OutputExists = 2,
    /// A row did not contain the requested column.
    MalformedRow = 3,
    /// Interrupted: processing was interrupted by user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "CD000",
            Self::GeneralError => "CD001",
            Self::OutputExists => "CD002",
            Self::MalformedRow => "CD003",
            Self::Interrupted => "CD130",
        }
    }

    /// Exit code for an error returned by [`run_app`](crate::run_app).
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        err.downcast_ref::<DupeError>()
            .map_or(Self::GeneralError, DupeError::exit_code)
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "CD003")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
    /// Rows processed before the failure
    pub rows_checked: u64,
    /// Duplicate values found before the failure
    pub duplicates_found: u64,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        let totals = err
            .downcast_ref::<DupeError>()
            .map(DupeError::totals)
            .unwrap_or_default();
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
            interrupted: exit_code == ExitCode::Interrupted,
            rows_checked: totals.rows_checked,
            duplicates_found: totals.duplicates_found,
        }
    }
}
