//! Progress reporting for the duplicate scan.
//!
//! The scanner calls a [`ProgressObserver`] after every row. Three observers are
//! provided:
//!
//! - [`TerminalProgress`]: two live counter lines redrawn in place with indicatif
//! - [`LogProgress`]: an info log line every N rows, for non-interactive output
//! - [`NoProgress`]: does nothing
//!
//! Use [`observer_for`] to pick the right one for the current environment.

use std::io::IsTerminal;
use std::sync::Arc;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::duplicates::ScanTotals;

/// Receives progress updates from the duplicate scanner.
pub trait ProgressObserver: Send + Sync {
    /// Called once before the first row is read.
    fn on_scan_start(&self) {}

    /// Called after every processed row.
    ///
    /// # Arguments
    ///
    /// * `rows_checked` - Rows processed so far
    /// * `duplicates_found` - Distinct duplicate values so far
    fn report_progress(&self, rows_checked: u64, duplicates_found: u64);

    /// Called once when the scan stops, successfully or not.
    fn on_scan_end(&self, _totals: ScanTotals) {}
}

/// Observer that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn report_progress(&self, _rows_checked: u64, _duplicates_found: u64) {}
}

/// Live terminal counters.
///
/// Renders `Rows Checked: N` and `Duplicate Entries: M` on two stacked lines that
/// are overwritten in place on stderr. Both lines are cleared when the scan ends
/// so the caller can print final totals.
pub struct TerminalProgress {
    multi: MultiProgress,
    rows: ProgressBar,
    duplicates: ProgressBar,
}

impl TerminalProgress {
    /// Create the two counter lines.
    #[must_use]
    pub fn new() -> Self {
        let multi = MultiProgress::new();
        let rows = multi.add(ProgressBar::new_spinner());
        rows.set_style(counter_style("Rows Checked: {pos}"));
        let duplicates = multi.add(ProgressBar::new_spinner());
        duplicates.set_style(counter_style("Duplicate Entries: {pos}"));
        Self {
            multi,
            rows,
            duplicates,
        }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

fn counter_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

impl ProgressObserver for TerminalProgress {
    fn on_scan_start(&self) {
        self.rows.set_position(0);
        self.duplicates.set_position(0);
    }

    fn report_progress(&self, rows_checked: u64, duplicates_found: u64) {
        self.rows.set_position(rows_checked);
        self.duplicates.set_position(duplicates_found);
    }

    fn on_scan_end(&self, _totals: ScanTotals) {
        self.rows.finish_and_clear();
        self.duplicates.finish_and_clear();
        let _ = self.multi.clear();
    }
}

/// Logs a progress line every `interval` rows.
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    interval: u64,
}

impl LogProgress {
    /// Create a logging observer. An interval of zero is treated as one.
    #[must_use]
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
        }
    }

    /// Rows between log lines.
    #[must_use]
    pub fn interval(&self) -> u64 {
        self.interval
    }
}

impl ProgressObserver for LogProgress {
    fn report_progress(&self, rows_checked: u64, duplicates_found: u64) {
        if rows_checked % self.interval == 0 {
            log::info!(
                "Rows Checked: {} | Duplicate Entries: {}",
                rows_checked,
                duplicates_found
            );
        }
    }

    fn on_scan_end(&self, totals: ScanTotals) {
        log::debug!(
            "Scan ended after {} rows with {} duplicate values",
            totals.rows_checked,
            totals.duplicates_found
        );
    }
}

/// Pick an observer for the current environment.
///
/// Quiet mode gets [`NoProgress`], an interactive stderr gets
/// [`TerminalProgress`], anything else gets [`LogProgress`].
#[must_use]
pub fn observer_for(quiet: bool, interval: u64) -> Arc<dyn ProgressObserver> {
    if quiet {
        Arc::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Arc::new(TerminalProgress::new())
    } else {
        Arc::new(LogProgress::new(interval))
    }
}
