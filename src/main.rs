//! csvdupe - Duplicate Row Finder for CSV Files
//!
//! Entry point for the csvdupe CLI application.

use clap::Parser;
use csvdupe::{
    cli::Cli,
    duplicates::DupeError,
    error::{ExitCode, StructuredError},
};
use yansi::Paint;

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    match csvdupe::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::for_error(&err);

            // Show how far processing got before reporting the failure
            if let Some(dupe) = err.downcast_ref::<DupeError>() {
                println!("{}", dupe.totals());
            }

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{}", json);
                } else {
                    eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
                }
            } else {
                let prefix = format!("[{}] Error:", exit_code.code_prefix());
                eprintln!("{} {:#}", prefix.red().bold(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
