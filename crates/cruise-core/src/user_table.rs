use cruise_model::{FieldKind, Value};

use crate::error::{Result, TableError};

/// Cell tokens treated as missing in every column (case-insensitive).
pub const DEFAULT_MISSING_TOKENS: &[&str] = &["NaN", "NA", "N/A"];

/// A cell whose text does not parse as its column's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnparsableCell;

/// One column of a user-supplied table with its declared field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserColumn {
    /// Header as it appeared in the source file.
    pub header: String,
    /// Declared field name (`other`, `unknown`, or a registry name).
    pub declared: String,
    /// Extra tokens that mean "no value" in this column.
    pub missing_tokens: Vec<String>,
}

impl UserColumn {
    pub fn new(header: impl Into<String>, declared: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            declared: declared.into(),
            missing_tokens: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_missing_token(mut self, token: impl Into<String>) -> Self {
        self.missing_tokens.push(token.into());
        self
    }

    fn is_missing_token(&self, cell: &str) -> bool {
        cell.is_empty()
            || DEFAULT_MISSING_TOKENS
                .iter()
                .any(|token| token.eq_ignore_ascii_case(cell))
            || self.missing_tokens.iter().any(|token| token == cell)
    }

    /// Parse a raw cell as `kind`.
    ///
    /// Missing tokens yield `Ok(None)`; text that does not parse as the kind
    /// yields [`UnparsableCell`] so the caller can record the cell.
    pub fn parse_cell(
        &self,
        raw: &str,
        kind: FieldKind,
    ) -> std::result::Result<Option<Value>, UnparsableCell> {
        let cell = raw.trim();
        if self.is_missing_token(cell) {
            return Ok(None);
        }
        match kind {
            FieldKind::Text => Ok(Some(Value::Text(cell.to_string()))),
            FieldKind::Integer => parse_integer(cell).map(|number| Some(Value::Integer(number))),
            FieldKind::Real => {
                let number: f64 = cell.parse().map_err(|_| UnparsableCell)?;
                Ok(number.is_finite().then_some(Value::Real(number)))
            }
        }
    }
}

// Accepts "12" and "12.0"; rejects "12.5".
fn parse_integer(cell: &str) -> std::result::Result<i32, UnparsableCell> {
    if let Ok(number) = cell.parse::<i32>() {
        return Ok(number);
    }
    let number: f64 = cell.parse().map_err(|_| UnparsableCell)?;
    if number.fract() == 0.0 && number >= f64::from(i32::MIN) && number <= f64::from(i32::MAX) {
        Ok(number as i32)
    } else {
        Err(UnparsableCell)
    }
}

/// A loosely typed table as supplied by an upstream ingestion step.
///
/// Cells are raw strings; interpretation happens during promotion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserTable {
    columns: Vec<UserColumn>,
    rows: Vec<Vec<String>>,
}

impl UserTable {
    pub fn new(columns: Vec<UserColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; its length must match the column count.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowLength {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[UserColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}
