use clap::Parser;
use csvdupe::cli::Cli;
use csvdupe::duplicates::DupeError;
use csvdupe::error::ExitCode;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn cli(args: &[&str]) -> Cli {
    let mut full = vec!["csvdupe"];
    full.extend_from_slice(args);
    Cli::try_parse_from(full).unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_run_terminal_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    fs::write(&input, "a,1\nb,2\na,3\nc,4\na,5").unwrap();

    let code = csvdupe::run_app(cli(&[path_str(&input), "-c", "0", "-q"])).unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_run_writes_output_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, "a,1\nb,2\na,3\nc,4\na,5\n").unwrap();

    let code = csvdupe::run_app(cli(&[
        path_str(&input),
        "-c",
        "0",
        "-o",
        path_str(&output),
        "-q",
    ]))
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(fs::read_to_string(&output).unwrap(), "a,1\na,3\na,5\n");
}

#[test]
fn test_run_no_duplicates_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, "a,1\nb,2\nc,3\n").unwrap();

    let code = csvdupe::run_app(cli(&[
        path_str(&input),
        "-c",
        "0",
        "--output_file",
        path_str(&output),
        "-q",
    ]))
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!output.exists());
}

#[test]
fn test_run_existing_output_aborts_before_reading() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("exists.csv");
    fs::write(&output, "already here").unwrap();
    // Input deliberately missing: the existence check must fire first
    let input = dir.path().join("missing.csv");

    let err = csvdupe::run_app(cli(&[
        path_str(&input),
        "-c",
        "0",
        "-o",
        path_str(&output),
        "-q",
    ]))
    .unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::OutputExists);
    assert!(err.to_string().contains("exists.csv"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "already here");
}

#[test]
fn test_run_malformed_row_cites_row() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    fs::write(&input, "a,1\nb,2\nc\nd,4\n").unwrap();

    let err = csvdupe::run_app(cli(&[path_str(&input), "-c", "1", "-q"])).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::MalformedRow);
    assert!(err.to_string().contains("check row 3"));
    let dupe = err.downcast_ref::<DupeError>().unwrap();
    assert_eq!(dupe.totals().rows_checked, 2);
}

#[test]
fn test_run_header_flag() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, "k;v\nx;1\ny;2\nx;3\n").unwrap();

    csvdupe::run_app(cli(&[
        path_str(&input),
        "-c",
        "0",
        "-d",
        ";",
        "--header",
        "-o",
        path_str(&output),
        "-q",
    ]))
    .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "k;v\nx;1\nx;3\n");
}

#[test]
fn test_run_missing_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("nope.csv");

    let err = csvdupe::run_app(cli(&[path_str(&input), "-c", "0", "-q"])).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert!(matches!(
        err.downcast_ref::<DupeError>(),
        Some(DupeError::Open { .. })
    ));
}
