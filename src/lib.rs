//! csvdupe - Duplicate Row Finder for CSV Files
//!
//! Scans a delimited text file for rows whose value in one column repeats, then
//! prints those rows as a numbered table or extracts them verbatim into a new file.
//!
//! Processing is two sequential passes over the input:
//!
//! 1. [`DuplicateScanner`] builds the set of values seen more than once
//! 2. [`DuplicateReporter`] re-reads the input and emits every row with such a value

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::IsTerminal;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::{
    Destination, DupeError, DuplicateReporter, DuplicateScanner, ReportOutcome, ScanConfig,
};
use crate::error::ExitCode;

/// Run the application with parsed arguments.
///
/// Prints the duplicate rows (or the output file location), the totals and the
/// elapsed time. Errors carrying totals are returned as [`DupeError`] inside the
/// `anyhow::Error` so the caller can print them and pick an exit code.
///
/// # Errors
///
/// - [`DupeError::OutputAlreadyExists`] before any input is read
/// - [`DupeError::MalformedRow`], [`DupeError::Interrupted`] or I/O errors from
///   either pass
/// - Configuration or signal handler failures
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color || !std::io::stdout().is_terminal() {
        yansi::disable();
    }

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_cli_overrides(&cli);
    log::debug!("Effective configuration: {:?}", config);

    if let Some(ref out) = cli.output_file {
        if out.exists() {
            return Err(DupeError::OutputAlreadyExists(out.clone()).into());
        }
    }

    let interrupt = signal::install_handler()?;
    let scan_config = ScanConfig::new(cli.column)
        .with_delimiter(config.delimiter)
        .with_header(config.header)
        .with_shutdown_flag(interrupt.flag())
        .with_progress(progress::observer_for(cli.quiet, config.progress_interval));

    let start = Instant::now();

    let scan = DuplicateScanner::new(scan_config.clone()).scan(&cli.input_file)?;
    if !cli.quiet {
        println!("{}", scan.totals());
    }

    let destination = match cli.output_file {
        Some(path) => Destination::File(path),
        None => Destination::Terminal,
    };

    match DuplicateReporter::new(scan_config).report(&cli.input_file, &scan, &destination)? {
        ReportOutcome::NoDuplicates => println!("No Duplicates"),
        ReportOutcome::Emitted { rows_emitted, .. } => {
            if let Destination::File(ref path) = destination {
                println!("Duplicates found: please see '{}'", path.display());
            }
            log::debug!("{} duplicate rows emitted", rows_emitted);
        }
    }

    if !cli.quiet {
        println!("Completed In: {}", output::format_elapsed(start.elapsed()));
    }

    Ok(ExitCode::Success)
}
