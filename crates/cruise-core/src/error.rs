use thiserror::Error;

use cruise_model::{FieldKind, ModelError};

/// Schema-level failures while building or querying a table.
///
/// Row-level time failures are not errors; see
/// [`RowTimeFailure`](crate::RowTimeFailure).
#[derive(Debug, Error)]
pub enum TableError {
    #[error("column {column} has an empty field name")]
    EmptyFieldName { column: usize },

    #[error("row {row} has {actual} values, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column {column} has {actual} values, expected {expected}")]
    ColumnLength {
        column: usize,
        expected: usize,
        actual: usize,
    },

    #[error("row {row}, column {column} ({field}): expected {expected} value, got {actual}")]
    KindMismatch {
        row: usize,
        column: usize,
        field: String,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("duplicate column for {name}")]
    DuplicateColumn { name: String },

    #[error("table has no {role} column")]
    MissingColumn { role: &'static str },

    #[error("{field} is missing in {count} row(s), first at row {first_row}")]
    MissingValues {
        field: String,
        count: usize,
        first_row: usize,
    },

    #[error("incomplete specification of sample time")]
    IncompleteTimeSpecification,

    #[error("sample time could not be resolved for {count} row(s): {summary}")]
    UnresolvedTimes { count: usize, summary: String },

    #[error("row index {row} out of bounds for table with {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },

    #[error("column index {column} out of bounds for table with {columns} columns")]
    ColumnOutOfBounds { column: usize, columns: usize },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, TableError>;
