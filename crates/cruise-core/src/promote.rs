//! Promotion of a user-declared table into a [`StandardizedTable`].

use cruise_model::catalog::standard_data_field;
use cruise_model::names::{
    DAY_OF_MONTH, HOUR_OF_DAY, MINUTE_OF_HOUR, MONTH_OF_YEAR, SECOND_OF_MINUTE, TIME, YEAR,
};
use cruise_model::{FieldKind, FieldRegistry, TypedField, Value};
use serde::Serialize;

use crate::datetime::{TimeParts, TimeStrategy, decompose_time, resolve_times};
use crate::error::{Result, TableError};
use crate::roles::{RoleIndex, SemanticRole};
use crate::table::{Row, StandardizedTable};
use crate::user_table::{UnparsableCell, UserTable};

/// Columns guaranteed on every promoted table, in the order they are
/// appended when absent.
const DERIVED_COLUMNS: [&str; 7] = [
    YEAR,
    MONTH_OF_YEAR,
    DAY_OF_MONTH,
    HOUR_OF_DAY,
    MINUTE_OF_HOUR,
    SECOND_OF_MINUTE,
    TIME,
];

/// A raw cell that did not parse as its column's kind and was treated as
/// missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellIssue {
    pub row: usize,
    pub column: String,
    pub value: String,
}

/// What promotion did besides carrying columns through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionReport {
    pub strategy: TimeStrategy,
    /// Headers of user columns that were not promoted (`other`, `unknown`,
    /// or not registered).
    pub dropped_columns: Vec<String>,
    pub unparsed_cells: Vec<CellIssue>,
    /// Names of the columns synthesized from the resolved sample time.
    pub derived_columns: Vec<String>,
}

impl StandardizedTable {
    /// Promote a user table. See [`StandardizedTable::promote_with_report`].
    pub fn promote(user: &UserTable, registry: &FieldRegistry) -> Result<Self> {
        Self::promote_with_report(user, registry).map(|(table, _)| table)
    }

    /// Promote a user table against `registry`.
    ///
    /// Usable, registered columns are carried through in declaration order.
    /// Longitude and latitude must be present in every row and every row's
    /// sample time must resolve. Missing year, month, day, hour, minute,
    /// second and `time` columns are synthesized from the resolved time.
    pub fn promote_with_report(
        user: &UserTable,
        registry: &FieldRegistry,
    ) -> Result<(Self, PromotionReport)> {
        let _span = tracing::info_span!("promote", rows = user.num_rows()).entered();

        let mut fields = Vec::new();
        let mut sources = Vec::new();
        let mut dropped_columns = Vec::new();
        for (source, column) in user.columns().iter().enumerate() {
            match registry.get(&column.declared) {
                Some(field) if field.is_usable() => {
                    fields.push(field.clone());
                    sources.push(source);
                }
                _ => {
                    tracing::debug!(
                        header = %column.header,
                        declared = %column.declared,
                        "column not promoted"
                    );
                    dropped_columns.push(column.header.clone());
                }
            }
        }
        let roles = RoleIndex::build(&fields)?;

        let mut unparsed_cells = Vec::new();
        let mut rows: Vec<Row> = Vec::with_capacity(user.num_rows());
        for (row_idx, raw_row) in user.rows().iter().enumerate() {
            let mut row = Vec::with_capacity(fields.len());
            for (field, &source) in fields.iter().zip(&sources) {
                let column = &user.columns()[source];
                let raw = &raw_row[source];
                match column.parse_cell(raw, field.kind) {
                    Ok(value) => row.push(value.filter(|value| !value.is_missing())),
                    Err(UnparsableCell) => {
                        tracing::warn!(
                            row = row_idx,
                            column = %column.header,
                            value = %raw,
                            kind = %field.kind,
                            "cell does not parse, treating as missing"
                        );
                        unparsed_cells.push(CellIssue {
                            row: row_idx,
                            column: column.header.clone(),
                            value: raw.clone(),
                        });
                        row.push(None);
                    }
                }
            }
            rows.push(row);
        }

        for role in [SemanticRole::Longitude, SemanticRole::Latitude] {
            let column = roles.require(role)?;
            require_complete(role.field_name(), &rows, column)?;
        }

        let resolution = resolve_times(&roles, &rows)?;
        if !resolution.is_complete() {
            return Err(TableError::UnresolvedTimes {
                count: resolution.failures.len(),
                summary: resolution.summary(),
            });
        }

        let mut derived_columns = Vec::new();
        for name in DERIVED_COLUMNS {
            if fields.iter().any(|field| field.name == name) {
                continue;
            }
            let Some(field) = derived_field(registry, name) else {
                continue;
            };
            for (row, time) in rows.iter_mut().zip(&resolution.times) {
                let number = time.and_then(|time| component(name, time));
                row.push(number.and_then(|number| as_kind(field.kind, number)));
            }
            tracing::debug!(column = name, "derived column from sample time");
            derived_columns.push(field.name.clone());
            fields.push(field);
        }

        let table = Self::from_typed(fields, rows)?;
        tracing::info!(
            strategy = %resolution.strategy,
            rows = table.num_rows(),
            columns = table.num_columns(),
            derived = derived_columns.len(),
            dropped = dropped_columns.len(),
            "promoted user table"
        );
        let report = PromotionReport {
            strategy: resolution.strategy,
            dropped_columns,
            unparsed_cells,
            derived_columns,
        };
        Ok((table, report))
    }
}

fn require_complete(field: &str, rows: &[Row], column: usize) -> Result<()> {
    let mut missing = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row[column].is_none())
        .map(|(idx, _)| idx);
    let Some(first_row) = missing.next() else {
        return Ok(());
    };
    Err(TableError::MissingValues {
        field: field.to_string(),
        count: 1 + missing.count(),
        first_row,
    })
}

// Registry definition when usable, otherwise the standard catalog's.
fn derived_field(registry: &FieldRegistry, name: &str) -> Option<TypedField> {
    registry
        .get(name)
        .filter(|field| field.is_usable())
        .cloned()
        .or_else(|| standard_data_field(name))
}

fn component(name: &str, time: f64) -> Option<f64> {
    if name == TIME {
        return Some(time);
    }
    let TimeParts {
        year,
        month,
        day,
        hour,
        minute,
        second,
    } = decompose_time(time)?;
    match name {
        YEAR => Some(f64::from(year)),
        MONTH_OF_YEAR => Some(f64::from(month)),
        DAY_OF_MONTH => Some(f64::from(day)),
        HOUR_OF_DAY => Some(f64::from(hour)),
        MINUTE_OF_HOUR => Some(f64::from(minute)),
        SECOND_OF_MINUTE => Some(second),
        _ => None,
    }
}

fn as_kind(kind: FieldKind, number: f64) -> Option<Value> {
    match kind {
        FieldKind::Real => Some(Value::Real(number)),
        FieldKind::Integer => (number.fract() == 0.0).then(|| Value::Integer(number as i32)),
        FieldKind::Text => Some(Value::Text(number.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user_table::UserColumn;

    fn user_table(columns: &[(&str, &str)], rows: &[&[&str]]) -> UserTable {
        let mut table = UserTable::new(
            columns
                .iter()
                .map(|(header, declared)| UserColumn::new(*header, *declared))
                .collect(),
        );
        for row in rows {
            table
                .push_row(row.iter().map(|cell| (*cell).to_string()).collect())
                .unwrap();
        }
        table
    }

    #[test]
    fn drops_unusable_and_unregistered_columns() {
        let user = user_table(
            &[
                ("Lon", "longitude"),
                ("Lat", "latitude"),
                ("Notes", "other"),
                ("Chl", "chlorophyll"),
                ("When", "date_time"),
            ],
            &[&["-158", "21.3", "calm", "0.2", "2014-01-13 06:15:00"]],
        );
        let (table, report) =
            StandardizedTable::promote_with_report(&user, &FieldRegistry::standard_data())
                .unwrap();
        assert_eq!(report.dropped_columns, vec!["Notes", "Chl"]);
        assert_eq!(report.strategy, TimeStrategy::TimestampString);
        assert_eq!(report.derived_columns.len(), 7);
        assert_eq!(table.num_columns(), 3 + 7);
        assert!(table.column_index(TIME).is_some());
    }

    #[test]
    fn existing_components_are_not_rederived() {
        let user = user_table(
            &[
                ("lon", "longitude"),
                ("lat", "latitude"),
                ("y", "year"),
                ("m", "month"),
                ("d", "day"),
                ("h", "hour"),
                ("min", "minute"),
            ],
            &[&["1", "2", "2014", "1", "13", "6", "15"]],
        );
        let (table, report) =
            StandardizedTable::promote_with_report(&user, &FieldRegistry::standard_data())
                .unwrap();
        assert_eq!(report.derived_columns, vec![SECOND_OF_MINUTE, TIME]);
        let time = table.column_index(TIME).unwrap();
        assert_eq!(
            table.value_at(0, time).unwrap(),
            Some(&Value::Real(1_389_593_700.0))
        );
    }

    #[test]
    fn unparsable_cells_are_reported() {
        let user = user_table(
            &[("lon", "longitude"), ("lat", "latitude"), ("t", "time"), ("s", "salinity")],
            &[&["1", "2", "0", "salty"]],
        );
        let (table, report) =
            StandardizedTable::promote_with_report(&user, &FieldRegistry::standard_data())
                .unwrap();
        assert_eq!(report.unparsed_cells.len(), 1);
        assert_eq!(report.unparsed_cells[0].column, "s");
        assert_eq!(report.strategy, TimeStrategy::EpochSeconds);
        let salinity = table.column_index("salinity").unwrap();
        assert_eq!(table.value_at(0, salinity).unwrap(), None);
    }

    #[test]
    fn unresolved_rows_fail_promotion() {
        let user = user_table(
            &[("lon", "longitude"), ("lat", "latitude"), ("ts", "date_time")],
            &[&["1", "2", "2014-01-13 06:15:00"], &["1", "2", "yesterday"]],
        );
        let err = StandardizedTable::promote(&user, &FieldRegistry::standard_data()).unwrap_err();
        assert!(matches!(err, TableError::UnresolvedTimes { count: 1, .. }));
    }

    #[test]
    fn missing_longitude_column_is_named() {
        let user = user_table(&[("lat", "latitude"), ("t", "time")], &[&["2", "0"]]);
        let err = StandardizedTable::promote(&user, &FieldRegistry::standard_data()).unwrap_err();
        assert_eq!(err.to_string(), "table has no longitude column");
    }
}
