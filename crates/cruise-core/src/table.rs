use cruise_model::{FieldKind, TypedField, Value};

use crate::datetime::{TimeResolution, resolve_times};
use crate::error::{Result, TableError};
use crate::roles::{RoleIndex, SemanticRole};

/// One table row: a value or `None` (missing) per column.
pub type Row = Vec<Option<Value>>;

/// An immutable, typed sample table.
///
/// Missing cells are always `None`: sentinel values (empty text, the integer
/// sentinel, reals near the real sentinel, non-finite reals) are normalized
/// away at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardizedTable {
    fields: Vec<TypedField>,
    rows: Vec<Row>,
    roles: RoleIndex,
}

impl StandardizedTable {
    /// Build a table from already-typed rows.
    ///
    /// Every row must have one cell per field, every present value must match
    /// its field's kind, and no non-repeatable field may appear twice. No
    /// columns are derived.
    pub fn from_typed(fields: Vec<TypedField>, rows: Vec<Row>) -> Result<Self> {
        let roles = RoleIndex::build(&fields)?;
        let mut normalized = Vec::with_capacity(rows.len());
        for (row_idx, row) in rows.into_iter().enumerate() {
            normalized.push(normalize_row(&fields, row_idx, row)?);
        }
        Ok(Self {
            fields,
            rows: normalized,
            roles,
        })
    }

    /// Build a table from column-major data.
    pub fn from_columns(fields: Vec<TypedField>, columns: Vec<Vec<Option<Value>>>) -> Result<Self> {
        if columns.len() != fields.len() {
            return Err(TableError::RowLength {
                row: 0,
                expected: fields.len(),
                actual: columns.len(),
            });
        }
        let num_rows = columns.first().map_or(0, Vec::len);
        for (column, values) in columns.iter().enumerate() {
            if values.len() != num_rows {
                return Err(TableError::ColumnLength {
                    column,
                    expected: num_rows,
                    actual: values.len(),
                });
            }
        }
        let mut rows: Vec<Row> = (0..num_rows)
            .map(|_| Vec::with_capacity(columns.len()))
            .collect();
        for values in columns {
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
        }
        Self::from_typed(fields, rows)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[TypedField] {
        &self.fields
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn roles(&self) -> &RoleIndex {
        &self.roles
    }

    pub fn field(&self, column: usize) -> Result<&TypedField> {
        self.fields
            .get(column)
            .ok_or(TableError::ColumnOutOfBounds {
                column,
                columns: self.fields.len(),
            })
    }

    pub fn row(&self, row: usize) -> Result<&[Option<Value>]> {
        self.rows
            .get(row)
            .map(Vec::as_slice)
            .ok_or(TableError::RowOutOfBounds {
                row,
                rows: self.rows.len(),
            })
    }

    /// Value at `(row, column)`; `Ok(None)` when the cell is missing.
    pub fn value_at(&self, row: usize, column: usize) -> Result<Option<&Value>> {
        self.field(column)?;
        Ok(self.row(row)?[column].as_ref())
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, column: usize) -> Result<Vec<Option<&Value>>> {
        self.field(column)?;
        Ok(self.rows.iter().map(|row| row[column].as_ref()).collect())
    }

    /// Position of the column named `name`. Repeatable fields are not
    /// addressable by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| !field.repeatable && field.name == name)
    }

    pub fn role_column(&self, role: SemanticRole) -> Option<usize> {
        self.roles.get(role)
    }

    /// Positions of every column of the given kind.
    pub fn columns_of_kind(&self, kind: FieldKind) -> Vec<usize> {
        self.positions(|field| field.kind == kind)
    }

    /// Positions of every column declared as `name`, including repeats of a
    /// repeatable field.
    pub fn columns_of_type(&self, name: &str) -> Vec<usize> {
        self.positions(|field| field.name == name)
    }

    fn positions(&self, predicate: impl Fn(&TypedField) -> bool) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, field)| predicate(field))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Numeric values of the named column, widened to `f64`.
    pub fn real_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let column = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row[column].as_ref().and_then(Value::as_real))
                .collect(),
        )
    }

    /// Resolve sample times from whichever time columns this table has.
    pub fn resolve_times(&self) -> Result<TimeResolution> {
        resolve_times(&self.roles, &self.rows)
    }
}

fn normalize_row(fields: &[TypedField], row_idx: usize, row: Row) -> Result<Row> {
    if row.len() != fields.len() {
        return Err(TableError::RowLength {
            row: row_idx,
            expected: fields.len(),
            actual: row.len(),
        });
    }
    let mut out = Vec::with_capacity(row.len());
    for (column, (field, value)) in fields.iter().zip(row).enumerate() {
        let Some(value) = value else {
            out.push(None);
            continue;
        };
        if !field.accepts(&value) {
            return Err(TableError::KindMismatch {
                row: row_idx,
                column,
                field: field.name.clone(),
                expected: field.kind,
                actual: value.kind(),
            });
        }
        out.push((!value.is_missing()).then_some(value));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cruise_model::names;

    fn sample() -> StandardizedTable {
        StandardizedTable::from_typed(
            vec![
                TypedField::real(names::LONGITUDE),
                TypedField::real(names::LATITUDE),
                TypedField::text("station"),
                TypedField::integer(names::QC_FLAG),
            ],
            vec![
                vec![
                    Some(Value::Real(-158.0)),
                    Some(Value::Real(21.3)),
                    Some(Value::text("ALOHA")),
                    Some(Value::Integer(2)),
                ],
                vec![
                    Some(Value::Real(-157.5)),
                    Some(Value::Real(-1.0e34)),
                    Some(Value::text("")),
                    Some(Value::Integer(-99)),
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn sentinels_become_missing() {
        let table = sample();
        assert_eq!(table.value_at(1, 1).unwrap(), None);
        assert_eq!(table.value_at(1, 2).unwrap(), None);
        assert_eq!(table.value_at(1, 3).unwrap(), None);
        assert_eq!(table.value_at(1, 0).unwrap(), Some(&Value::Real(-157.5)));
    }

    #[test]
    fn accessors_check_bounds() {
        let table = sample();
        assert!(matches!(
            table.value_at(2, 0),
            Err(TableError::RowOutOfBounds { row: 2, rows: 2 })
        ));
        assert!(matches!(
            table.value_at(0, 4),
            Err(TableError::ColumnOutOfBounds {
                column: 4,
                columns: 4
            })
        ));
        assert!(table.column(9).is_err());
        assert!(table.row(5).is_err());
    }

    #[test]
    fn kind_lookup() {
        let table = sample();
        assert_eq!(table.columns_of_kind(FieldKind::Real), vec![0, 1]);
        assert_eq!(table.columns_of_type("station"), vec![2]);
        assert_eq!(table.role_column(SemanticRole::Latitude), Some(1));
        assert_eq!(
            table.real_column(names::QC_FLAG),
            Some(vec![Some(2.0), None])
        );
    }

    #[test]
    fn from_columns_transposes() {
        let table = StandardizedTable::from_columns(
            vec![TypedField::integer("a"), TypedField::text("b")],
            vec![
                vec![Some(Value::Integer(1)), Some(Value::Integer(2))],
                vec![Some(Value::text("x")), None],
            ],
        )
        .unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.value_at(1, 0).unwrap(), Some(&Value::Integer(2)));
        assert_eq!(table.value_at(1, 1).unwrap(), None);
    }

    #[test]
    fn from_columns_rejects_ragged() {
        let err = StandardizedTable::from_columns(
            vec![TypedField::integer("a"), TypedField::integer("b")],
            vec![vec![Some(Value::Integer(1))], vec![]],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::ColumnLength { column: 1, .. }));
    }
}
