use csvdupe::duplicates::{
    Destination, DupeError, DuplicateReporter, DuplicateScanner, ReportOutcome, ScanConfig,
};
use csvdupe::output::TerminalSink;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn scan_and_report_to_file(input: &Path, output: &Path, config: ScanConfig) -> ReportOutcome {
    let scan = DuplicateScanner::new(config.clone()).scan(input).unwrap();
    DuplicateReporter::new(config)
        .report(input, &scan, &Destination::File(output.to_path_buf()))
        .unwrap()
}

#[test]
fn test_file_output_is_byte_identical() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("dupes.csv");
    fs::write(&input, "k1, spaced \r\nk2,x\nk1,tail  \nk3,y\nk1,last").unwrap();

    let outcome = scan_and_report_to_file(&input, &output, ScanConfig::new(0));

    assert_eq!(
        outcome,
        ReportOutcome::Emitted {
            rows_read: 5,
            rows_emitted: 3
        }
    );
    assert_eq!(
        fs::read(&output).unwrap(),
        b"k1, spaced \r\nk1,tail  \nk1,last"
    );
}

#[test]
fn test_file_output_preserves_order_across_values() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("dupes.csv");
    fs::write(&input, "b,1\na,2\nb,3\nc,4\na,5\n").unwrap();

    scan_and_report_to_file(&input, &output, ScanConfig::new(0));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "b,1\na,2\nb,3\na,5\n"
    );
}

#[test]
fn test_no_duplicates_creates_no_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("dupes.csv");
    fs::write(&input, "a\nb\nc\n").unwrap();

    let outcome = scan_and_report_to_file(&input, &output, ScanConfig::new(0));

    assert_eq!(outcome, ReportOutcome::NoDuplicates);
    assert!(!output.exists());
}

#[test]
fn test_header_copied_to_output_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("dupes.csv");
    fs::write(&input, "sku,name\n10,pen\n11,ink\n10,pencil\n").unwrap();

    scan_and_report_to_file(&input, &output, ScanConfig::new(0).with_header(true));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "sku,name\n10,pen\n10,pencil\n"
    );
}

#[test]
fn test_existing_output_never_overwritten() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("dupes.csv");
    fs::write(&input, "a\na\n").unwrap();
    fs::write(&output, "precious").unwrap();

    let scan = DuplicateScanner::new(ScanConfig::new(0)).scan(&input).unwrap();
    let err = DuplicateReporter::new(ScanConfig::new(0))
        .report(&input, &scan, &Destination::File(output.clone()))
        .unwrap_err();

    assert!(matches!(err, DupeError::OutputAlreadyExists(_)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "precious");
}

#[test]
fn test_terminal_table_with_row_numbers() {
    yansi::disable();
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    fs::write(&input, "a,1\nb,2\na,3\nc,4\na,5\n").unwrap();

    let config = ScanConfig::new(0);
    let scan = DuplicateScanner::new(config.clone()).scan(&input).unwrap();
    let mut buf = Vec::new();
    DuplicateReporter::new(config)
        .report_to(&input, &scan, TerminalSink::new(&mut buf))
        .unwrap();

    let out = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![" Row  | Data", "  1   | a,1", "  3   | a,3", "  5   | a,5"]
    );
}

#[test]
fn test_report_fails_if_input_changed_between_passes() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    fs::write(&input, "a,1\na,2\n").unwrap();

    let config = ScanConfig::new(1);
    let scan = DuplicateScanner::new(ScanConfig::new(0)).scan(&input).unwrap();
    fs::write(&input, "a,1\nbroken\n").unwrap();

    let mut buf = Vec::new();
    let err = DuplicateReporter::new(config)
        .report_to(&input, &scan, TerminalSink::new(&mut buf))
        .unwrap_err();

    match err {
        DupeError::MalformedRow { line, totals, .. } => {
            assert_eq!(line, 2);
            assert_eq!(totals.rows_checked, 1);
        }
        other => panic!("Expected MalformedRow, got {:?}", other),
    }
}
