//! Error types for trajectory file reading and writing.

use std::io;
use std::path::PathBuf;

use cruise_core::TableError;
use cruise_model::{FieldKind, ModelError};
use thiserror::Error;

/// Errors raised while writing or reading a trajectory file.
///
/// Fields that are registered but absent from a file are not errors; the
/// readers report them alongside their result.
#[derive(Debug, Error)]
pub enum DsgError {
    /// The table lacks a column the file layout requires.
    #[error("table has no {role} column, required for file output")]
    MissingRole { role: &'static str },

    /// Text that cannot be stored in a character block without changing it.
    #[error("text value of {name} contains a NUL character")]
    TextNul { name: String },

    /// Dimensions, variables or attributes the container rejected.
    #[error("invalid file layout: {message}")]
    Layout { message: String },

    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The header promises more data than the file holds.
    #[error("{name} needs {needed} bytes but the file has {available}")]
    Truncated {
        name: String,
        needed: u64,
        available: u64,
    },

    /// A metadata variable holds more than one trajectory entry.
    #[error("metadata variable {name} has length {len} along its first dimension, expected 1")]
    MetadataShape { name: String, len: usize },

    /// A data variable disagrees with the row count set by `time`.
    #[error("variable {name} has {actual} rows, expected {expected}")]
    RowCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// On-disk storage type cannot hold the field's kind.
    #[error("variable {name} is stored as {storage}, which cannot hold a {expected} field")]
    StorageMismatch {
        name: String,
        expected: FieldKind,
        storage: &'static str,
    },

    /// A text variable that is not a two-dimensional character block.
    #[error("text variable {name} has {rank} dimension(s), expected 2")]
    TextShape { name: String, rank: usize },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl DsgError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DsgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = DsgError::MissingRole { role: "latitude" };
        assert_eq!(
            err.to_string(),
            "table has no latitude column, required for file output"
        );

        let err = DsgError::StorageMismatch {
            name: "qc_flag".to_string(),
            expected: FieldKind::Integer,
            storage: "double",
        };
        assert_eq!(
            err.to_string(),
            "variable qc_flag is stored as double, which cannot hold a integer field"
        );

        let err = DsgError::TextNul {
            name: "platform_name".to_string(),
        };
        assert!(err.to_string().contains("platform_name"));
    }
}
