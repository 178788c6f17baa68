//! Error types for cruise data ingestion.

use std::path::PathBuf;

use cruise_core::TableError;
use cruise_model::{FieldKind, ModelError};
use thiserror::Error;

/// Errors that can occur while loading a dataset declaration or a CSV file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === CSV Errors ===
    /// Malformed CSV (including rows with the wrong number of fields).
    #[error("failed to parse CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Blank header cell.
    #[error("column {index} of {path} has an empty header")]
    EmptyColumnName { path: PathBuf, index: usize },

    /// Header appearing twice.
    #[error("duplicate header '{header}' in {path}")]
    DuplicateHeader { path: PathBuf, header: String },

    // === Declaration Errors ===
    /// Dataset declaration is not valid TOML or has unexpected keys.
    #[error("invalid dataset declaration {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Delimiter is not a single ASCII character.
    #[error("delimiter {delimiter:?} is not a single ASCII character")]
    InvalidDelimiter { delimiter: char },

    /// Declared metadata value does not fit its field.
    #[error("metadata {field} must be {expected}, got {found}")]
    MetadataValue {
        field: String,
        expected: FieldKind,
        found: &'static str,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

impl IngestError {
    /// Map an I/O error on `path`, separating "not found".
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/cruise.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /data/cruise.csv");

        let err = IngestError::MetadataValue {
            field: "dataset_id".to_string(),
            expected: FieldKind::Text,
            found: "integer",
        };
        assert_eq!(err.to_string(), "metadata dataset_id must be text, got integer");
    }

    #[test]
    fn test_not_found_is_separated() {
        let path = std::path::Path::new("x.csv");
        let err = IngestError::from_io(path, std::io::ErrorKind::NotFound.into());
        assert!(matches!(err, IngestError::FileNotFound { .. }));
        let err = IngestError::from_io(path, std::io::ErrorKind::PermissionDenied.into());
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
