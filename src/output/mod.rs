//! Destinations for duplicate rows and end-of-run formatting.
//!
//! - [`TerminalSink`] prints a numbered table
//! - [`FileSink`] writes rows verbatim into a new file

pub mod file;
pub mod terminal;

use std::time::Duration;

pub use file::FileSink;
pub use terminal::TerminalSink;

/// Format an elapsed wall-clock time as `<h>hr <mm>m <ss>s`.
///
/// # Examples
///
/// ```
/// use csvdupe::output::format_elapsed;
/// use std::time::Duration;
///
/// assert_eq!(format_elapsed(Duration::from_secs(3725)), "1hr 02m 05s");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}hr {:02}m {:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}
