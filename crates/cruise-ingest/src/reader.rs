//! CSV loading into a user table.

use std::collections::BTreeSet;
use std::path::Path;

use cruise_core::UserTable;

use crate::config::DatasetConfig;
use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Check a file's size against [`MAX_CSV_FILE_SIZE`].
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check a file's size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Read the CSV at `path` into a [`UserTable`] declared by `config`.
///
/// The first row is the header. Cells are kept as trimmed strings; every row
/// must have one cell per header.
pub fn read_user_table(path: &Path, config: &DatasetConfig) -> Result<UserTable> {
    let _span = tracing::info_span!("read_csv", path = %path.display()).entered();
    check_file_size(path)?;

    let csv_error = |source| IngestError::CsvRead {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter_byte()?)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = read_headers(path, &mut reader)?;
    let mut table = UserTable::new(config.user_columns(&headers));
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        table.push_row(record.iter().map(str::to_string).collect())?;
    }

    tracing::info!(
        rows = table.num_rows(),
        columns = headers.len(),
        "loaded CSV"
    );
    Ok(table)
}

fn read_headers<R: std::io::Read>(path: &Path, reader: &mut csv::Reader<R>) -> Result<Vec<String>> {
    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    if headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let mut seen = BTreeSet::new();
    for (index, header) in headers.iter().enumerate() {
        if header.is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
                index,
            });
        }
        if !seen.insert(header.as_str()) {
            return Err(IngestError::DuplicateHeader {
                path: path.to_path_buf(),
                header: header.clone(),
            });
        }
    }
    Ok(headers)
}
