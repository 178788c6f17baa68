//! Loading CSV files and declarations from disk.

use std::fs;

use cruise_core::StandardizedTable;
use cruise_ingest::{
    DatasetConfig, IngestError, check_file_size_with_limit, load_config, read_user_table,
};
use cruise_model::{FieldRegistry, Value, names};
use tempfile::TempDir;

const DECLARATION: &str = r#"
[columns]
Lon = "longitude"
Lat = "latitude"
Depth = { field = "sample_depth", missing = ["-999"] }
Timestamp = "date_time"
Notes = "other"

[metadata]
dataset_id = "33RO20140113"
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_csv_to_promoted_table() {
    let dir = TempDir::new().unwrap();
    let config = load_config(&write(&dir, "cruise.toml", DECLARATION)).unwrap();
    let csv = write(
        &dir,
        "cruise.csv",
        "Lon,Lat,Depth,Timestamp,Notes,Ship\n\
         -158.0, 21.3 ,0.0,2014-01-13 06:15:00,first,KM\n\
         -158.1,21.4,-999,2014-01-13T06:20:00Z,\"second, quoted\",KM\n",
    );

    let user = read_user_table(&csv, &config).unwrap();
    assert_eq!(user.num_rows(), 2);
    assert_eq!(user.columns()[5].declared, names::UNKNOWN);
    assert_eq!(user.cell(0, 1), Some("21.3"));
    assert_eq!(user.cell(1, 4), Some("second, quoted"));

    let table = StandardizedTable::promote(&user, &FieldRegistry::standard_data()).unwrap();
    let depth = table.column_index(names::SAMPLE_DEPTH).unwrap();
    assert_eq!(table.value_at(0, depth).unwrap(), Some(&Value::Real(0.0)));
    assert_eq!(table.value_at(1, depth).unwrap(), None);
    assert!(table.column_index("Ship").is_none());

    let metadata = config
        .build_metadata(&FieldRegistry::standard_metadata())
        .unwrap();
    assert_eq!(metadata.text(names::DATASET_ID), Some("33RO20140113"));
}

#[test]
fn test_semicolon_delimiter() {
    let dir = TempDir::new().unwrap();
    let mut config = DatasetConfig::from_toml(DECLARATION).unwrap();
    config.delimiter = Some(';');
    let csv = write(&dir, "cruise.csv", "Lon;Lat\n-158,0;21,3\n");
    let user = read_user_table(&csv, &config).unwrap();
    assert_eq!(user.cell(0, 0), Some("-158,0"));
}

#[test]
fn test_ragged_row_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = DatasetConfig::from_toml(DECLARATION).unwrap();
    let csv = write(&dir, "cruise.csv", "Lon,Lat\n-158.0,21.3\n-158.1\n");
    let err = read_user_table(&csv, &config).unwrap_err();
    assert!(matches!(err, IngestError::CsvRead { .. }));
}

#[test]
fn test_header_problems() {
    let dir = TempDir::new().unwrap();
    let config = DatasetConfig::default();

    let csv = write(&dir, "dup.csv", "Lon,Lon\n1,2\n");
    let err = read_user_table(&csv, &config).unwrap_err();
    assert!(matches!(err, IngestError::DuplicateHeader { header, .. } if header == "Lon"));

    let csv = write(&dir, "blank.csv", "Lon, ,Lat\n1,2,3\n");
    let err = read_user_table(&csv, &config).unwrap_err();
    assert!(matches!(err, IngestError::EmptyColumnName { index: 1, .. }));

    let csv = write(&dir, "empty.csv", "");
    let err = read_user_table(&csv, &config).unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
}

#[test]
fn test_missing_files() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.csv");
    let err = read_user_table(&missing, &DatasetConfig::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));

    let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));

    let bad = write(&dir, "bad.toml", "[columns\n");
    let err = load_config(&bad).unwrap_err();
    assert!(matches!(err, IngestError::ConfigParse { .. }));
}

#[test]
fn test_size_limit() {
    let dir = TempDir::new().unwrap();
    let csv = write(&dir, "big.csv", "Lon\n1\n2\n3\n");
    assert!(check_file_size_with_limit(&csv, 1024).is_ok());
    let err = check_file_size_with_limit(&csv, 4).unwrap_err();
    assert!(matches!(err, IngestError::FileTooLarge { max_size: 4, .. }));
}
