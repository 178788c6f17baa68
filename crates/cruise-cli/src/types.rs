use std::path::PathBuf;

use cruise_core::{CellIssue, TimeStrategy};
use cruise_model::{FieldKind, Value};
use serde::Serialize;

/// Outcome of `cruise convert`.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    pub output: PathBuf,
    pub rows: usize,
    /// Columns written to the file, in table order.
    pub columns: Vec<String>,
    pub strategy: TimeStrategy,
    pub dropped_columns: Vec<String>,
    pub derived_columns: Vec<String>,
    pub unparsed_cells: Vec<CellIssue>,
    /// Metadata fields filled from the data extent.
    pub coverage_filled: Vec<String>,
}

/// Outcome of `cruise inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectResult {
    pub path: PathBuf,
    pub rows: usize,
    pub metadata: Vec<MetadataEntry>,
    pub columns: Vec<ColumnSummary>,
    pub absent_metadata: Vec<String>,
    pub absent_columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetadataEntry {
    pub name: String,
    pub kind: FieldKind,
    /// `None` when the stored value is the sentinel.
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: FieldKind,
    pub units: Option<String>,
    /// Rows holding a value.
    pub present: usize,
}
