//! Standard field catalogs.
//!
//! Each catalog is an explicit, ordered list. The order is the order in
//! which variables are written to files.

use crate::TypedField;
use crate::names::{
    DATASET_ID, DATASET_NAME, DATE, DAY_OF_MONTH, DAY_OF_YEAR, EASTMOST_LONGITUDE,
    EPOCH_SECONDS_UNIT, HOUR_OF_DAY, INVESTIGATORS, LATITUDE, LONGITUDE, MINUTE_OF_HOUR,
    MONTH_OF_YEAR, NORTHMOST_LATITUDE, ORGANIZATION, OXYGEN, PLATFORM_NAME, PLATFORM_TYPE,
    PRESSURE, QC_FLAG, SALINITY, SAMPLE_DEPTH, SAMPLE_NUMBER, SECOND_OF_DAY, SECOND_OF_MINUTE,
    SOUTHMOST_LATITUDE, TEMPERATURE, TIME, TIME_COVERAGE_END, TIME_COVERAGE_START, TIME_OF_DAY,
    TIMESTAMP, VERSION, WESTMOST_LONGITUDE, YEAR,
};

const LOCATION: &str = "Location";
const TIME_CATEGORY: &str = "Time";
const IDENTIFIER: &str = "Identifier";
const TEMPERATURE_CATEGORY: &str = "Temperature";
const SALINITY_CATEGORY: &str = "Salinity";
const PRESSURE_CATEGORY: &str = "Pressure";
const OXYGEN_CATEGORY: &str = "Dissolved O2";
const QUALITY: &str = "Quality";

/// Fields recognized as table columns.
pub fn standard_data_fields() -> Vec<TypedField> {
    vec![
        TypedField::real(LONGITUDE)
            .with_display_name("longitude")
            .with_description("sample longitude")
            .with_standard_name("longitude")
            .with_category(LOCATION)
            .with_units(["degrees_east"]),
        TypedField::real(LATITUDE)
            .with_display_name("latitude")
            .with_description("sample latitude")
            .with_standard_name("latitude")
            .with_category(LOCATION)
            .with_units(["degrees_north"]),
        TypedField::real(SAMPLE_DEPTH)
            .with_display_name("sample depth")
            .with_description("sample depth")
            .with_standard_name("depth")
            .with_category(LOCATION)
            .with_units(["meters"]),
        TypedField::real(TIME)
            .with_display_name("time")
            .with_description("sample time")
            .with_standard_name("time")
            .with_category(TIME_CATEGORY)
            .with_units([EPOCH_SECONDS_UNIT]),
        TypedField::text(TIMESTAMP)
            .with_display_name("date time")
            .with_description("sample date and time")
            .with_category(TIME_CATEGORY)
            .with_units(["yyyy-mm-dd hh:mm:ss"]),
        TypedField::text(DATE)
            .with_display_name("date")
            .with_description("sample date")
            .with_category(TIME_CATEGORY)
            .with_units(["yyyy-mm-dd"]),
        TypedField::text(TIME_OF_DAY)
            .with_display_name("time of day")
            .with_description("sample time of day")
            .with_category(TIME_CATEGORY)
            .with_units(["hh:mm:ss"]),
        TypedField::integer(YEAR)
            .with_display_name("year")
            .with_description("sample year")
            .with_category(TIME_CATEGORY),
        TypedField::integer(MONTH_OF_YEAR)
            .with_display_name("month of year")
            .with_description("sample month of year")
            .with_category(TIME_CATEGORY),
        TypedField::integer(DAY_OF_MONTH)
            .with_display_name("day of month")
            .with_description("sample day of month")
            .with_category(TIME_CATEGORY),
        TypedField::integer(HOUR_OF_DAY)
            .with_display_name("hour of day")
            .with_description("sample hour of day")
            .with_category(TIME_CATEGORY),
        TypedField::integer(MINUTE_OF_HOUR)
            .with_display_name("minute of hour")
            .with_description("sample minute of hour")
            .with_category(TIME_CATEGORY),
        TypedField::real(SECOND_OF_MINUTE)
            .with_display_name("second of minute")
            .with_description("sample second of minute")
            .with_category(TIME_CATEGORY),
        TypedField::real(DAY_OF_YEAR)
            .with_display_name("day of year")
            .with_description("sample day of year, with Jan 1 as day 1")
            .with_category(TIME_CATEGORY),
        TypedField::real(SECOND_OF_DAY)
            .with_display_name("second of day")
            .with_description("sample second of day")
            .with_category(TIME_CATEGORY)
            .with_units(["seconds"]),
        TypedField::integer(SAMPLE_NUMBER)
            .with_display_name("sample number")
            .with_description("sequence number of the sample within the cruise")
            .with_category(IDENTIFIER),
        TypedField::real(TEMPERATURE)
            .with_display_name("temperature")
            .with_description("in-situ sea water temperature")
            .with_standard_name("sea_water_temperature")
            .with_category(TEMPERATURE_CATEGORY)
            .with_units(["degrees_C"]),
        TypedField::real(SALINITY)
            .with_display_name("salinity")
            .with_description("practical salinity")
            .with_standard_name("sea_water_practical_salinity")
            .with_category(SALINITY_CATEGORY)
            .with_units(["PSU"]),
        TypedField::real(PRESSURE)
            .with_display_name("pressure")
            .with_description("sea water pressure")
            .with_standard_name("sea_water_pressure")
            .with_category(PRESSURE_CATEGORY)
            .with_units(["dbar"]),
        TypedField::real(OXYGEN)
            .with_display_name("dissolved oxygen")
            .with_description("dissolved oxygen concentration")
            .with_standard_name("moles_of_oxygen_per_unit_mass_in_sea_water")
            .with_category(OXYGEN_CATEGORY)
            .with_units(["umol/kg"]),
        TypedField::integer(QC_FLAG)
            .with_display_name("QC flag")
            .with_description("WOCE quality control flag")
            .with_category(QUALITY),
        TypedField::other(),
    ]
}

/// The standard data field named `name`, if any.
pub fn standard_data_field(name: &str) -> Option<TypedField> {
    standard_data_fields()
        .into_iter()
        .find(|field| field.name == name)
}

/// Fields recognized as dataset-level metadata.
pub fn standard_metadata_fields() -> Vec<TypedField> {
    vec![
        TypedField::text(DATASET_ID)
            .with_display_name("dataset ID")
            .with_description("unique identifier of the dataset")
            .with_category(IDENTIFIER),
        TypedField::text(DATASET_NAME)
            .with_display_name("dataset name")
            .with_description("name of the dataset or cruise")
            .with_category(IDENTIFIER),
        TypedField::text(PLATFORM_NAME)
            .with_display_name("platform name")
            .with_description("name of the ship or platform")
            .with_standard_name("platform_name")
            .with_category(IDENTIFIER),
        TypedField::text(PLATFORM_TYPE)
            .with_display_name("platform type")
            .with_description("type of the ship or platform")
            .with_category(IDENTIFIER),
        TypedField::text(ORGANIZATION)
            .with_display_name("organization")
            .with_description("organization responsible for the dataset")
            .with_category(IDENTIFIER),
        TypedField::text(INVESTIGATORS)
            .with_display_name("investigators")
            .with_description("principal investigators, semicolon separated")
            .with_category(IDENTIFIER),
        TypedField::text(VERSION)
            .with_display_name("version")
            .with_description("version of the standardized dataset")
            .with_category(IDENTIFIER),
        TypedField::real(WESTMOST_LONGITUDE)
            .with_display_name("westmost longitude")
            .with_description("westernmost longitude of the samples")
            .with_standard_name("geospatial_lon_min")
            .with_category(LOCATION)
            .with_units(["degrees_east"]),
        TypedField::real(EASTMOST_LONGITUDE)
            .with_display_name("eastmost longitude")
            .with_description("easternmost longitude of the samples")
            .with_standard_name("geospatial_lon_max")
            .with_category(LOCATION)
            .with_units(["degrees_east"]),
        TypedField::real(SOUTHMOST_LATITUDE)
            .with_display_name("southmost latitude")
            .with_description("southernmost latitude of the samples")
            .with_standard_name("geospatial_lat_min")
            .with_category(LOCATION)
            .with_units(["degrees_north"]),
        TypedField::real(NORTHMOST_LATITUDE)
            .with_display_name("northmost latitude")
            .with_description("northernmost latitude of the samples")
            .with_standard_name("geospatial_lat_max")
            .with_category(LOCATION)
            .with_units(["degrees_north"]),
        TypedField::real(TIME_COVERAGE_START)
            .with_display_name("begin time")
            .with_description("earliest sample time")
            .with_standard_name("time")
            .with_category(TIME_CATEGORY)
            .with_units([EPOCH_SECONDS_UNIT]),
        TypedField::real(TIME_COVERAGE_END)
            .with_display_name("end time")
            .with_description("latest sample time")
            .with_standard_name("time")
            .with_category(TIME_CATEGORY)
            .with_units([EPOCH_SECONDS_UNIT]),
    ]
}
