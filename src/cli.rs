//! Command-line interface definitions for csvdupe.
//!
//! # Example
//!
//! ```bash
//! # Print rows whose first column repeats
//! csvdupe data.csv -c 0
//!
//! # Extract them into a new file instead
//! csvdupe data.csv -c 0 -o duplicates.csv
//!
//! # Semicolon-separated file with a header row, debug logging
//! csvdupe -v data.csv -c 2 --delimiter ';' --header
//! ```

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Find rows with duplicate values in one column of a CSV file.
///
/// Every row whose value in the chosen column occurs more than once is reported,
/// first occurrence included, in file order.
#[derive(Debug, Parser)]
#[command(name = "csvdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: PathBuf,

    /// Column to search for duplicates (zero-based)
    #[arg(short, long, value_name = "INDEX")]
    pub column: usize,

    /// Write duplicate rows to this file instead of the terminal
    ///
    /// The file must not already exist.
    #[arg(
        short,
        long = "output_file",
        visible_alias = "output-file",
        value_name = "PATH"
    )]
    pub output_file: Option<PathBuf>,

    /// Field delimiter [default: ,]
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Treat the first line as a header row
    #[arg(long)]
    pub header: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress, totals and timing output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}
