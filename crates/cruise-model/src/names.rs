//! Stable variable names of the standard fields.

// Reserved declarations
pub const OTHER: &str = "other";
pub const UNKNOWN: &str = "unknown";

// Location
pub const LONGITUDE: &str = "longitude";
pub const LATITUDE: &str = "latitude";
pub const SAMPLE_DEPTH: &str = "sample_depth";

// Time
pub const TIME: &str = "time";
pub const TIMESTAMP: &str = "date_time";
pub const DATE: &str = "date";
pub const TIME_OF_DAY: &str = "time_of_day";
pub const YEAR: &str = "year";
pub const MONTH_OF_YEAR: &str = "month";
pub const DAY_OF_MONTH: &str = "day";
pub const HOUR_OF_DAY: &str = "hour";
pub const MINUTE_OF_HOUR: &str = "minute";
pub const SECOND_OF_MINUTE: &str = "second";
pub const DAY_OF_YEAR: &str = "day_of_year";
pub const SECOND_OF_DAY: &str = "sec_of_day";

// Measurements
pub const SAMPLE_NUMBER: &str = "sample_number";
pub const TEMPERATURE: &str = "temperature";
pub const SALINITY: &str = "salinity";
pub const PRESSURE: &str = "pressure";
pub const OXYGEN: &str = "oxygen";
pub const QC_FLAG: &str = "qc_flag";

// Dataset metadata
pub const DATASET_ID: &str = "dataset_id";
pub const DATASET_NAME: &str = "dataset_name";
pub const PLATFORM_NAME: &str = "platform_name";
pub const PLATFORM_TYPE: &str = "platform_type";
pub const ORGANIZATION: &str = "organization";
pub const INVESTIGATORS: &str = "investigators";
pub const VERSION: &str = "version";
pub const WESTMOST_LONGITUDE: &str = "westmost_longitude";
pub const EASTMOST_LONGITUDE: &str = "eastmost_longitude";
pub const SOUTHMOST_LATITUDE: &str = "southmost_latitude";
pub const NORTHMOST_LATITUDE: &str = "northmost_latitude";
pub const TIME_COVERAGE_START: &str = "time_coverage_start";
pub const TIME_COVERAGE_END: &str = "time_coverage_end";

/// Unit of the canonical time variable.
pub const EPOCH_SECONDS_UNIT: &str = "seconds since 1970-01-01T00:00:00Z";
