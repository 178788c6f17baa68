//! Trajectory file writer.

use std::path::Path;

use cruise_core::{SemanticRole, StandardizedTable};
use cruise_model::{
    FieldKind, INTEGER_MISSING_VALUE, MetadataRecord, REAL_MISSING_VALUE, TEXT_MISSING_VALUE,
    TypedField, Value,
};
use netcdf3::{DataVector, Version};

use crate::container::DsgFile;
use crate::error::{DsgError, Result};
use crate::layout::{
    AttrValue, CONVENTIONS, FEATURE_TYPE, OBS_DIM, OBS_STRING_LENGTH_DIM, ROW_SIZE_VAR,
    STRING_LENGTH_DIM, TRAJECTORY_DIM, attr, field_attributes, text_width, trajectory_id_field,
};

/// Columns a table must carry to be written.
pub const REQUIRED_ROLES: [SemanticRole; 4] = [
    SemanticRole::Longitude,
    SemanticRole::Latitude,
    SemanticRole::SampleDepth,
    SemanticRole::Time,
];

/// Write `metadata` and `table` as a trajectory file at `path`.
///
/// The file is staged beside `path` and committed with a single rename, so a
/// failed write never leaves a partial file at `path`.
pub fn write_dsg(
    path: &Path,
    metadata: &MetadataRecord,
    table: &StandardizedTable,
    version: Version,
) -> Result<()> {
    let _span = tracing::info_span!(
        "write_dsg",
        path = %path.display(),
        rows = table.num_rows(),
        format = ?version
    )
    .entered();

    let file = build_dsg(metadata, table)?;
    file.write(path, version)?;

    tracing::info!(variables = file.num_variables(), "trajectory file written");
    Ok(())
}

/// Lay out `metadata` and `table` as a trajectory dataset ready to write.
pub fn build_dsg(metadata: &MetadataRecord, table: &StandardizedTable) -> Result<DsgFile> {
    check_required_roles(table)?;

    let rows = table.num_rows();
    let columns: Vec<usize> = (0..table.num_columns())
        .filter(|&column| {
            let field = &table.fields()[column];
            if !field.is_usable() {
                tracing::debug!(column, field = %field.name, "column not written");
            }
            field.is_usable()
        })
        .collect();

    let metadata_width = text_width(metadata.iter().filter_map(|(_, value)| value.as_text()));
    let data_width = text_width(
        columns
            .iter()
            .filter(|&&column| table.fields()[column].kind == FieldKind::Text)
            .flat_map(|&column| {
                table
                    .rows()
                    .iter()
                    .filter_map(move |row| row[column].as_ref().and_then(Value::as_text))
            }),
    );

    let mut file = DsgFile::new();
    file.add_fixed_dim(TRAJECTORY_DIM, 1)?;
    file.set_unlimited_dim(OBS_DIM, rows)?;
    file.add_fixed_dim(STRING_LENGTH_DIM, metadata_width)?;
    file.add_fixed_dim(OBS_STRING_LENGTH_DIM, data_width)?;

    file.add_global_text(attr::FEATURE_TYPE, FEATURE_TYPE)?;
    file.add_global_text(attr::CONVENTIONS, CONVENTIONS)?;
    file.add_global_text(
        attr::HISTORY,
        &format!(
            "created by {} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
    )?;

    let trajectory_id = trajectory_id_field(metadata.fields());
    for (field, value) in metadata.iter() {
        let dimensions = variable_dimensions(field.kind, TRAJECTORY_DIM, STRING_LENGTH_DIM);
        let data = encode_cells(field, std::iter::once(Some(value)), metadata_width)?;
        add_field_variable(&mut file, field, &dimensions, data)?;
        if trajectory_id == Some(field.name.as_str()) {
            file.add_attribute(&field.name, attr::CF_ROLE, &AttrValue::text("trajectory_id"))?;
        }
    }

    for &column in &columns {
        let field = &table.fields()[column];
        let dimensions = variable_dimensions(field.kind, OBS_DIM, OBS_STRING_LENGTH_DIM);
        let cells = table.rows().iter().map(|row| row[column].as_ref());
        let data = encode_cells(field, cells, data_width)?;
        add_field_variable(&mut file, field, &dimensions, data)?;
    }

    let count = i32::try_from(rows).map_err(|_| DsgError::Layout {
        message: format!("{rows} rows do not fit the {ROW_SIZE_VAR} variable"),
    })?;
    file.add_variable(ROW_SIZE_VAR, &[TRAJECTORY_DIM], DataVector::I32(vec![count]))?;
    file.add_attribute(ROW_SIZE_VAR, attr::SAMPLE_DIMENSION, &AttrValue::text(OBS_DIM))?;

    tracing::debug!(
        metadata = metadata.fields().len(),
        columns = columns.len(),
        metadata_width,
        data_width,
        "built trajectory layout"
    );
    Ok(file)
}

fn check_required_roles(table: &StandardizedTable) -> Result<()> {
    for role in REQUIRED_ROLES {
        if !table.roles().has(role) {
            return Err(DsgError::MissingRole {
                role: role.field_name(),
            });
        }
    }
    Ok(())
}

fn variable_dimensions<'a>(kind: FieldKind, outer: &'a str, width: &'a str) -> Vec<&'a str> {
    match kind {
        FieldKind::Text => vec![outer, width],
        FieldKind::Integer | FieldKind::Real => vec![outer],
    }
}

fn add_field_variable(
    file: &mut DsgFile,
    field: &TypedField,
    dimensions: &[&str],
    data: DataVector,
) -> Result<()> {
    file.add_variable(&field.name, dimensions, data)?;
    for (name, value) in field_attributes(field) {
        file.add_attribute(&field.name, name, &value)?;
    }
    Ok(())
}

/// Storage array for a run of cells; missing cells become the sentinel.
///
/// Text is padded with NUL bytes to `width`, so a value that itself holds a
/// NUL is rejected rather than silently cut short on read.
fn encode_cells<'a>(
    field: &TypedField,
    cells: impl Iterator<Item = Option<&'a Value>>,
    width: usize,
) -> Result<DataVector> {
    let data = match field.kind {
        FieldKind::Text => {
            let mut block = Vec::new();
            for cell in cells {
                let text = cell.and_then(Value::as_text).unwrap_or(TEXT_MISSING_VALUE);
                if text.contains('\0') {
                    return Err(DsgError::TextNul {
                        name: field.name.clone(),
                    });
                }
                let start = block.len();
                block.extend_from_slice(text.as_bytes());
                block.resize(start + width, 0);
            }
            DataVector::U8(block)
        }
        FieldKind::Integer => DataVector::I32(
            cells
                .map(|cell| cell.and_then(Value::as_integer).unwrap_or(INTEGER_MISSING_VALUE))
                .collect(),
        ),
        FieldKind::Real => DataVector::F64(
            cells
                .map(|cell| {
                    cell.and_then(Value::as_real)
                        .filter(|number| !FieldKind::is_missing_real(*number))
                        .unwrap_or(REAL_MISSING_VALUE)
                })
                .collect(),
        ),
    };
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cruise_model::FieldRegistry;
    use cruise_model::catalog::standard_data_field;
    use cruise_model::names::{DATASET_ID, LATITUDE, LONGITUDE, PLATFORM_NAME, SAMPLE_DEPTH, TIME};

    fn location_fields() -> Vec<TypedField> {
        [LONGITUDE, LATITUDE, SAMPLE_DEPTH, TIME]
            .into_iter()
            .filter_map(standard_data_field)
            .collect()
    }

    fn two_row_table() -> StandardizedTable {
        let mut fields = location_fields();
        fields.push(TypedField::other());
        let rows = vec![
            vec![
                Some(Value::Real(-158.0)),
                Some(Value::Real(21.3)),
                Some(Value::Real(0.0)),
                Some(Value::Real(1_389_593_700.0)),
                Some(Value::text("note")),
            ],
            vec![
                Some(Value::Real(-158.1)),
                Some(Value::Real(21.4)),
                None,
                Some(Value::Real(1_389_593_760.0)),
                None,
            ],
        ];
        StandardizedTable::from_typed(fields, rows).unwrap()
    }

    #[test]
    fn missing_role_is_named() {
        let fields: Vec<TypedField> = location_fields()
            .into_iter()
            .filter(|field| field.name != LATITUDE)
            .collect();
        let table = StandardizedTable::from_typed(fields, vec![]).unwrap();
        let metadata = MetadataRecord::new(&FieldRegistry::standard_metadata());
        let err = build_dsg(&metadata, &table).unwrap_err();
        assert!(matches!(err, DsgError::MissingRole { role } if role == LATITUDE));
    }

    fn text_attribute(file: &DsgFile, variable: &str, name: &str) -> Option<String> {
        file.data_set()
            .get_var(variable)
            .and_then(|variable| variable.get_attr_as_string(name))
    }

    #[test]
    fn layout_of_a_small_table() {
        let mut metadata = MetadataRecord::new(&FieldRegistry::standard_metadata());
        metadata.set(DATASET_ID, Value::text("33RO20140113")).unwrap();
        let file = build_dsg(&metadata, &two_row_table()).unwrap();
        let data_set = file.data_set();

        assert_eq!(data_set.dim_size(OBS_DIM), Some(2));
        assert_eq!(data_set.dim_size(STRING_LENGTH_DIM), Some(12));
        assert_eq!(data_set.dim_size(OBS_STRING_LENGTH_DIM), Some(1));
        assert!(data_set.get_var("other").is_none());

        assert_eq!(
            file.values(SAMPLE_DEPTH),
            Some(&DataVector::F64(vec![0.0, REAL_MISSING_VALUE]))
        );
        assert_eq!(
            text_attribute(&file, SAMPLE_DEPTH, attr::POSITIVE).as_deref(),
            Some("down")
        );
        assert_eq!(
            text_attribute(&file, DATASET_ID, attr::CF_ROLE).as_deref(),
            Some("trajectory_id")
        );
        assert!(
            data_set
                .get_var(DATASET_ID)
                .and_then(|variable| variable.get_attr(attr::MISSING_VALUE))
                .is_none()
        );

        assert_eq!(file.values(ROW_SIZE_VAR), Some(&DataVector::I32(vec![2])));
        assert_eq!(
            data_set.get_global_attr_as_string(attr::FEATURE_TYPE).as_deref(),
            Some(FEATURE_TYPE)
        );
    }

    #[test]
    fn text_is_padded_to_the_block_width() {
        let mut metadata = MetadataRecord::new(&FieldRegistry::standard_metadata());
        metadata.set(DATASET_ID, Value::text("KM")).unwrap();
        metadata.set(PLATFORM_NAME, Value::text("Kilo")).unwrap();
        let file = build_dsg(&metadata, &two_row_table()).unwrap();
        assert_eq!(
            file.values(DATASET_ID),
            Some(&DataVector::U8(b"KM\0\0".to_vec()))
        );
    }

    #[test]
    fn nul_in_text_is_rejected() {
        let mut metadata = MetadataRecord::new(&FieldRegistry::standard_metadata());
        metadata.set(PLATFORM_NAME, Value::text("ab\0")).unwrap();
        let err = build_dsg(&metadata, &two_row_table()).unwrap_err();
        assert!(matches!(err, DsgError::TextNul { ref name } if name == PLATFORM_NAME));

        let mut fields = location_fields();
        fields.push(TypedField::text("station"));
        let mut row: Vec<Option<Value>> = vec![Some(Value::Real(0.0)); 4];
        row.push(Some(Value::text("A\0B")));
        let table = StandardizedTable::from_typed(fields, vec![row]).unwrap();
        let metadata = MetadataRecord::new(&FieldRegistry::standard_metadata());
        let err = build_dsg(&metadata, &table).unwrap_err();
        assert!(matches!(err, DsgError::TextNul { ref name } if name == "station"));
    }

    #[test]
    fn empty_table_still_has_a_layout() {
        let table = StandardizedTable::from_typed(location_fields(), vec![]).unwrap();
        let metadata = MetadataRecord::new(&FieldRegistry::standard_metadata());
        let file = build_dsg(&metadata, &table).unwrap();
        assert_eq!(file.data_set().dim_size(OBS_DIM), Some(0));
        assert_eq!(file.data_set().dim_size(STRING_LENGTH_DIM), Some(1));
        assert_eq!(file.values(ROW_SIZE_VAR), Some(&DataVector::I32(vec![0])));
        assert_eq!(file.values(TIME), Some(&DataVector::F64(vec![])));
    }
}
