//! Loading series from files on disk.

use std::io::Write;

use adapter_loader::{CsvLoader, LoaderConfig, LoaderError};
use eva_core::types::Date;
use tempfile::NamedTempFile;

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_sparse_file_fills_every_day() {
    let file = write_csv(
        "Date,Fatalities\n\
         31/12/2019,3\n\
         15/01/2020,210\n\
         01/03/2020,7\n",
    );
    let series = CsvLoader::default().load_path(file.path()).unwrap();

    assert_eq!(series.start(), Date::from_ymd(2019, 12, 31).unwrap());
    assert_eq!(series.end(), Date::from_ymd(2020, 3, 1).unwrap());
    assert_eq!(series.len(), 62);
    assert_eq!(series.total(), 220.0);
    assert_eq!(series.get(Date::from_ymd(2020, 1, 15).unwrap()), Some(210.0));
    assert_eq!(series.get(Date::from_ymd(2020, 1, 16).unwrap()), Some(0.0));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = CsvLoader::default().load_path(&path).unwrap_err();
    match err {
        LoaderError::Io { path: reported, .. } => assert!(reported.ends_with("absent.csv")),
        other => panic!("expected Io, got {:?}", other),
    }
}

#[test]
fn test_bad_row_in_file_reports_line() {
    let file = write_csv("Date,Fatalities\n01/01/2020,1\n02/01/2020,1\n31/02/2020,4\n");
    let err = CsvLoader::default().load_path(file.path()).unwrap_err();
    assert!(matches!(err, LoaderError::DateParse { line: 4, .. }));
    assert!(err.to_string().contains("31/02/2020"));
}

#[test]
fn test_semicolon_file_is_missing_column() {
    let file = write_csv("Date;Fatalities\n01/01/2020;1\n");
    let err = CsvLoader::new(LoaderConfig::default())
        .load_path(file.path())
        .unwrap_err();
    assert!(matches!(err, LoaderError::MissingColumn { .. }));
}
