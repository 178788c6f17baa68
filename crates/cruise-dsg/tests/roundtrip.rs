//! Property: reading a written file restores the metadata record and table.

use cruise_core::StandardizedTable;
use cruise_dsg::{Version, read_data, read_metadata, write_dsg};
use cruise_model::catalog::standard_data_field;
use cruise_model::{FieldRegistry, MetadataRecord, TypedField, Value, names};
use proptest::prelude::*;
use tempfile::tempdir;

fn table_fields() -> Vec<TypedField> {
    [
        names::LONGITUDE,
        names::LATITUDE,
        names::SAMPLE_DEPTH,
        names::TIME,
        names::TIMESTAMP,
        names::QC_FLAG,
        names::TEMPERATURE,
    ]
    .into_iter()
    .filter_map(standard_data_field)
    .collect()
}

fn real() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::ZERO
}

fn row() -> impl Strategy<Value = Vec<Option<Value>>> {
    (
        -180.0..180.0f64,
        -90.0..90.0f64,
        prop::option::of(0.0..6000.0f64),
        0.0..2.0e9f64,
        prop::option::of("[0-9: -]{0,19}"),
        prop::option::of(any::<i32>()),
        prop::option::of(real()),
    )
        .prop_map(|(lon, lat, depth, time, stamp, flag, temp)| {
            vec![
                Some(Value::Real(lon)),
                Some(Value::Real(lat)),
                depth.map(Value::Real),
                Some(Value::Real(time)),
                stamp.map(Value::Text),
                flag.map(Value::Integer),
                temp.map(Value::Real),
            ]
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn written_files_read_back_unchanged(
        rows in prop::collection::vec(row(), 0..12),
        dataset_id in "[A-Z0-9]{0,12}",
        west in prop::option::of(real()),
        offset64 in any::<bool>(),
    ) {
        let table = StandardizedTable::from_typed(table_fields(), rows).unwrap();
        let registry = FieldRegistry::standard_metadata();
        let mut metadata = MetadataRecord::new(&registry);
        metadata.set(names::DATASET_ID, Value::Text(dataset_id)).unwrap();
        if let Some(west) = west {
            metadata.set(names::WESTMOST_LONGITUDE, Value::Real(west)).unwrap();
        }

        let version = if offset64 { Version::Offset64Bit } else { Version::Classic };
        let dir = tempdir().unwrap();
        let path = dir.path().join("trajectory.nc");
        write_dsg(&path, &metadata, &table, version).unwrap();

        let (back_metadata, absent) = read_metadata(&path, &registry).unwrap();
        prop_assert!(absent.is_empty());
        prop_assert_eq!(back_metadata, metadata);

        let data_registry = FieldRegistry::build(table_fields()).unwrap();
        let (back, absent) = read_data(&path, &data_registry).unwrap();
        prop_assert!(absent.is_empty());
        prop_assert_eq!(back, table);
    }
}
