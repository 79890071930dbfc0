use csvdupe::duplicates::{DupeError, DuplicateScanner, ScanConfig};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_scan_sample_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.csv");
    fs::write(&path, "a,1\nb,2\na,3\nc,4\na,5").unwrap();

    let result = DuplicateScanner::new(ScanConfig::new(0)).scan(&path).unwrap();

    assert_eq!(result.rows_checked(), 5);
    assert_eq!(result.duplicate_count(), 1);
    assert!(result.is_duplicate("a"));
    assert_eq!(result.duplicates().len(), 1);
}

#[test]
fn test_scan_second_column() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.csv");
    fs::write(
        &path,
        "1,alice@example.com,Alice\n\
         2,bob@example.com,Bob\n\
         3,alice@example.com,Alicia\n\
         4,carol@example.com,Carol\n\
         5,bob@example.com,Robert\n",
    )
    .unwrap();

    let result = DuplicateScanner::new(ScanConfig::new(1)).scan(&path).unwrap();

    assert_eq!(result.rows_checked(), 5);
    assert_eq!(result.duplicate_count(), 2);
    assert!(result.is_duplicate("alice@example.com"));
    assert!(result.is_duplicate("bob@example.com"));
    assert!(!result.is_duplicate("carol@example.com"));
}

#[test]
fn test_scan_no_duplicates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unique.csv");
    fs::write(&path, "a,1\nb,1\nc,1\n").unwrap();

    let result = DuplicateScanner::new(ScanConfig::new(0)).scan(&path).unwrap();

    assert_eq!(result.rows_checked(), 3);
    assert_eq!(result.duplicate_count(), 0);
    assert!(!result.has_duplicates());
}

#[test]
fn test_scan_twice_is_identical() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("repeat.csv");
    fs::write(&path, "x,1\ny,2\nx,3\nz,4\ny,5\n").unwrap();

    let scanner = DuplicateScanner::new(ScanConfig::new(0));
    let first = scanner.scan(&path).unwrap();
    let second = scanner.scan(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_scan_missing_file() {
    let result = DuplicateScanner::new(ScanConfig::new(0))
        .scan(std::path::Path::new("/non/existent/input/12345.csv"));

    match result {
        Err(DupeError::Open { path, .. }) => {
            assert!(path.to_string_lossy().contains("12345.csv"));
        }
        other => panic!("Expected Open error, got {:?}", other),
    }
}

#[test]
fn test_scan_malformed_third_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.csv");
    fs::write(&path, "a,b,c\nd,e,f\ng,h\ni,j,k\n").unwrap();

    let err = DuplicateScanner::new(ScanConfig::new(2))
        .scan(&path)
        .unwrap_err();

    match err {
        DupeError::MalformedRow { line, totals, .. } => {
            assert_eq!(line, 3);
            assert_eq!(totals.rows_checked, 2);
        }
        other => panic!("Expected MalformedRow, got {:?}", other),
    }
}

#[test]
fn test_scan_column_out_of_range_on_first_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("narrow.csv");
    fs::write(&path, "a,b\nc,d\n").unwrap();

    let err = DuplicateScanner::new(ScanConfig::new(9))
        .scan(&path)
        .unwrap_err();

    assert!(err
        .to_string()
        .contains("check column arg vs number of columns"));
    assert_eq!(err.totals().rows_checked, 0);
}

#[test]
fn test_scan_with_header_and_semicolons() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("semi.csv");
    fs::write(&path, "id;city\n1;Oslo\n2;Rome\n3;Oslo\n").unwrap();

    let config = ScanConfig::new(1).with_delimiter(';').with_header(true);
    let result = DuplicateScanner::new(config).scan(&path).unwrap();

    assert_eq!(result.rows_checked(), 3);
    assert!(result.is_duplicate("Oslo"));
    assert!(!result.is_duplicate("city"));
}
