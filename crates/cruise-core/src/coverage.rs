use cruise_model::names::{
    EASTMOST_LONGITUDE, LATITUDE, LONGITUDE, NORTHMOST_LATITUDE, SOUTHMOST_LATITUDE, TIME,
    TIME_COVERAGE_END, TIME_COVERAGE_START, WESTMOST_LONGITUDE,
};
use cruise_model::{MetadataRecord, Value};

use crate::error::Result;
use crate::table::StandardizedTable;

/// Fill the bounding box and time coverage of `metadata` from `table`.
///
/// Only values that are still missing are filled, and only for fields the
/// record governs. Returns the names of the fields that were set.
pub fn apply_coverage(
    metadata: &mut MetadataRecord,
    table: &StandardizedTable,
) -> Result<Vec<&'static str>> {
    let mut filled = Vec::new();
    let pairs = [
        (LONGITUDE, WESTMOST_LONGITUDE, EASTMOST_LONGITUDE),
        (LATITUDE, SOUTHMOST_LATITUDE, NORTHMOST_LATITUDE),
        (TIME, TIME_COVERAGE_START, TIME_COVERAGE_END),
    ];
    for (column, min_field, max_field) in pairs {
        let Some((min, max)) = table.real_column(column).and_then(|values| extent(&values)) else {
            continue;
        };
        for (field, value) in [(min_field, min), (max_field, max)] {
            if metadata.get(field).is_some() && metadata.is_missing(field) {
                metadata.set(field, Value::Real(value))?;
                filled.push(field);
            }
        }
    }
    if !filled.is_empty() {
        tracing::debug!(fields = ?filled, "filled coverage metadata");
    }
    Ok(filled)
}

fn extent(values: &[Option<f64>]) -> Option<(f64, f64)> {
    values.iter().flatten().fold(None, |acc, &value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cruise_model::{FieldRegistry, TypedField};

    #[test]
    fn fills_only_missing_values() {
        let table = StandardizedTable::from_typed(
            vec![TypedField::real(LONGITUDE), TypedField::real(LATITUDE)],
            vec![
                vec![Some(Value::Real(-158.0)), Some(Value::Real(21.3))],
                vec![Some(Value::Real(-157.0)), None],
                vec![Some(Value::Real(-159.5)), Some(Value::Real(22.0))],
            ],
        )
        .unwrap();
        let mut metadata = MetadataRecord::new(&FieldRegistry::standard_metadata());
        metadata
            .set(NORTHMOST_LATITUDE, Value::Real(30.0))
            .unwrap();

        let filled = apply_coverage(&mut metadata, &table).unwrap();

        assert_eq!(
            filled,
            vec![WESTMOST_LONGITUDE, EASTMOST_LONGITUDE, SOUTHMOST_LATITUDE]
        );
        assert_eq!(metadata.real(WESTMOST_LONGITUDE), Some(-159.5));
        assert_eq!(metadata.real(EASTMOST_LONGITUDE), Some(-157.0));
        assert_eq!(metadata.real(SOUTHMOST_LATITUDE), Some(21.3));
        assert_eq!(metadata.real(NORTHMOST_LATITUDE), Some(30.0));
        assert!(metadata.is_missing(TIME_COVERAGE_START));
    }
}
