//! Duplicate detection and extraction.
//!
//! This module provides the two passes over the input:
//! - [`DuplicateScanner`]: partitions key values into seen and duplicate sets
//! - [`DuplicateReporter`]: re-reads the input and emits rows with duplicate keys

pub mod error;
pub mod finder;
pub mod reporter;

pub use error::{DupeError, ScanTotals};
pub use finder::{DuplicateScanner, ScanConfig, ScanResult};
pub use reporter::{Destination, DuplicateReporter, ReportOutcome, RowSink};
