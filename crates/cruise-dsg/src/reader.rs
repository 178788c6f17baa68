//! Trajectory file reader.
//!
//! Registered fields missing from a file are reported by name instead of
//! failing the read: metadata keeps the field's sentinel and data columns are
//! all missing.

use std::path::Path;

use cruise_core::StandardizedTable;
use cruise_model::names::TIME;
use cruise_model::{
    FieldKind, FieldRegistry, INTEGER_MISSING_VALUE, MetadataRecord, TypedField, Value,
};
use netcdf3::DataVector;

use crate::container::{DsgSource, storage_name};
use crate::error::{DsgError, Result};
use crate::layout::{FEATURE_TYPE, OBS_DIM, attr};

/// Read the metadata record governed by `registry` from the file at `path`.
///
/// Returns the record and the names of registered fields the file lacks.
pub fn read_metadata(
    path: &Path,
    registry: &FieldRegistry,
) -> Result<(MetadataRecord, Vec<String>)> {
    let _span = tracing::info_span!("read_metadata", path = %path.display()).entered();
    let mut source = DsgSource::open(path)?;
    check_feature_type(&source);
    let mut record = MetadataRecord::new(registry);
    let mut absent = Vec::new();

    for field in registry.usable_fields() {
        let Some(shape) = source.shape(&field.name) else {
            tracing::warn!(field = %field.name, "metadata field absent from file");
            absent.push(field.name.clone());
            continue;
        };
        let len = shape.first().copied().unwrap_or(1);
        if len != 1 {
            return Err(DsgError::MetadataShape {
                name: field.name.clone(),
                len,
            });
        }
        let values = source.read(&field.name)?;
        if let Some(Some(value)) = decode_cells(&field.name, field, &shape, values)?
            .into_iter()
            .next()
        {
            record.set(&field.name, value)?;
        }
    }

    tracing::info!(
        fields = record.fields().len(),
        absent = absent.len(),
        "read metadata"
    );
    Ok((record, absent))
}

/// Read the data table with the columns of `registry` from the file at
/// `path`.
///
/// Columns follow `registry` order. The row count is the length of the
/// `time` variable, or of the `obs` dimension when `time` is absent.
/// Returns the table and the names of registered fields the file lacks.
pub fn read_data(
    path: &Path,
    registry: &FieldRegistry,
) -> Result<(StandardizedTable, Vec<String>)> {
    let _span = tracing::info_span!("read_data", path = %path.display()).entered();
    let mut source = DsgSource::open(path)?;
    check_feature_type(&source);

    let rows = row_count(&source);
    if !u64::try_from(rows).is_ok_and(|rows| rows <= source.file_len()) {
        return Err(DsgError::Truncated {
            name: OBS_DIM.to_string(),
            needed: u64::try_from(rows).unwrap_or(u64::MAX),
            available: source.file_len(),
        });
    }

    let fields: Vec<TypedField> = registry.usable_fields().cloned().collect();
    let mut present = Vec::with_capacity(fields.len());
    for field in &fields {
        let Some(shape) = source.shape(&field.name) else {
            present.push(None);
            continue;
        };
        let values = source.read(&field.name)?;
        tracing::debug!(field = %field.name, storage = storage_name(&values), "read column");
        let cells = decode_cells(&field.name, field, &shape, values)?;
        if cells.len() != rows {
            return Err(DsgError::RowCountMismatch {
                name: field.name.clone(),
                expected: rows,
                actual: cells.len(),
            });
        }
        present.push(Some(cells));
    }

    let mut absent = Vec::new();
    let columns = fields
        .iter()
        .zip(present)
        .map(|(field, cells)| {
            cells.unwrap_or_else(|| {
                tracing::warn!(field = %field.name, "data field absent from file");
                absent.push(field.name.clone());
                vec![None; rows]
            })
        })
        .collect();

    let table = StandardizedTable::from_columns(fields, columns)?;
    tracing::info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        absent = absent.len(),
        "read data table"
    );
    Ok((table, absent))
}

fn row_count(source: &DsgSource) -> usize {
    match source.shape(TIME) {
        Some(shape) => shape.first().copied().unwrap_or(0),
        None => source.dim_size(OBS_DIM).unwrap_or(0),
    }
}

fn check_feature_type(source: &DsgSource) {
    let feature_type = source.global_text(attr::FEATURE_TYPE);
    if feature_type.as_deref() != Some(FEATURE_TYPE) {
        tracing::warn!(
            feature_type = feature_type.as_deref().unwrap_or("(none)"),
            "file is not marked as a trajectory"
        );
    }
}

/// Decode the values of variable `name`, laid out as `shape`, into one cell
/// per entry of its first dimension.
///
/// Sentinels (and reals within tolerance of the real sentinel) come back as
/// `None`.
fn decode_cells(
    name: &str,
    field: &TypedField,
    shape: &[usize],
    values: DataVector,
) -> Result<Vec<Option<Value>>> {
    let storage_mismatch = |values: &DataVector| DsgError::StorageMismatch {
        name: name.to_string(),
        expected: field.kind,
        storage: storage_name(values),
    };

    let cells = match (field.kind, values) {
        (FieldKind::Text, DataVector::U8(bytes)) => {
            let &[entries, width] = shape else {
                return Err(DsgError::TextShape {
                    name: name.to_string(),
                    rank: shape.len(),
                });
            };
            if width == 0 {
                return Ok(vec![None; entries]);
            }
            bytes
                .chunks(width)
                .map(|chunk| {
                    let end = chunk.iter().rposition(|&byte| byte != 0).map_or(0, |i| i + 1);
                    let text = String::from_utf8_lossy(&chunk[..end]).into_owned();
                    (!text.is_empty()).then_some(Value::Text(text))
                })
                .collect()
        }
        (FieldKind::Integer, DataVector::I8(numbers)) => integers(numbers.into_iter().map(i32::from)),
        (FieldKind::Integer, DataVector::I16(numbers)) => integers(numbers.into_iter().map(i32::from)),
        (FieldKind::Integer, DataVector::I32(numbers)) => integers(numbers.into_iter()),
        (FieldKind::Real, DataVector::F32(numbers)) => reals(numbers.into_iter().map(f64::from)),
        (FieldKind::Real, DataVector::F64(numbers)) => reals(numbers.into_iter()),
        (_, values) => return Err(storage_mismatch(&values)),
    };
    Ok(cells)
}

fn integers(numbers: impl Iterator<Item = i32>) -> Vec<Option<Value>> {
    numbers
        .map(|number| (number != INTEGER_MISSING_VALUE).then_some(Value::Integer(number)))
        .collect()
}

fn reals(numbers: impl Iterator<Item = f64>) -> Vec<Option<Value>> {
    numbers
        .map(|number| (!FieldKind::is_missing_real(number)).then_some(Value::Real(number)))
        .collect()
}
