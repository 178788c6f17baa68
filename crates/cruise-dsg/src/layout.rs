//! Names and attribute conventions of the trajectory file layout.

use cruise_model::names::{DATASET_ID, EPOCH_SECONDS_UNIT, SAMPLE_DEPTH};
use cruise_model::{FieldKind, INTEGER_MISSING_VALUE, REAL_MISSING_VALUE, TypedField};

/// Dimension shared by every metadata variable (length 1).
pub const TRAJECTORY_DIM: &str = "trajectory";
/// Dimension of one entry per sample. Stored as the record dimension.
pub const OBS_DIM: &str = "obs";
/// Character width of metadata text variables.
pub const STRING_LENGTH_DIM: &str = "string_length";
/// Character width of data text variables.
pub const OBS_STRING_LENGTH_DIM: &str = "obs_string_length";

/// Sample-count variable.
pub const ROW_SIZE_VAR: &str = "rowSize";

pub const FEATURE_TYPE: &str = "Trajectory";
pub const CONVENTIONS: &str = "CF-1.6";
pub const TIME_ORIGIN: &str = "01-JAN-1970 00:00:00";

pub mod attr {
    pub const FEATURE_TYPE: &str = "featureType";
    pub const CONVENTIONS: &str = "Conventions";
    pub const HISTORY: &str = "history";
    pub const MISSING_VALUE: &str = "missing_value";
    pub const FILL_VALUE: &str = "_FillValue";
    pub const LONG_NAME: &str = "long_name";
    pub const STANDARD_NAME: &str = "standard_name";
    pub const IOOS_CATEGORY: &str = "ioos_category";
    pub const UNITS: &str = "units";
    pub const POSITIVE: &str = "positive";
    pub const CF_ROLE: &str = "cf_role";
    pub const TIME_ORIGIN: &str = "time_origin";
    pub const SAMPLE_DIMENSION: &str = "sample_dimension";
}

/// Value of a variable attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Int(i32),
    Double(f64),
}

impl AttrValue {
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Width of a character dimension holding `values`: the longest string in
/// bytes, never less than 1.
pub fn text_width<'a>(values: impl IntoIterator<Item = &'a str>) -> usize {
    values.into_iter().map(str::len).max().unwrap_or(0).max(1)
}

/// Sentinel attribute value in the storage type of `kind`.
///
/// Text has no sentinel attribute; its missing value is the empty string.
pub fn sentinel_attribute(kind: FieldKind) -> Option<AttrValue> {
    match kind {
        FieldKind::Text => None,
        FieldKind::Integer => Some(AttrValue::Int(INTEGER_MISSING_VALUE)),
        FieldKind::Real => Some(AttrValue::Double(REAL_MISSING_VALUE)),
    }
}

/// Attributes describing `field`, in file order.
///
/// Descriptive attributes are omitted when the field leaves them unset.
pub fn field_attributes(field: &TypedField) -> Vec<(&'static str, AttrValue)> {
    let mut attributes = Vec::new();
    if let Some(sentinel) = sentinel_attribute(field.kind) {
        attributes.push((attr::MISSING_VALUE, sentinel.clone()));
        attributes.push((attr::FILL_VALUE, sentinel));
    }
    let descriptive = [
        (attr::LONG_NAME, field.description.as_deref()),
        (attr::STANDARD_NAME, field.standard_name.as_deref()),
        (attr::IOOS_CATEGORY, field.category.as_deref()),
        (attr::UNITS, field.file_unit()),
    ];
    for (name, value) in descriptive {
        if let Some(value) = value {
            attributes.push((name, AttrValue::text(value)));
        }
    }
    if field.name == SAMPLE_DEPTH {
        attributes.push((attr::POSITIVE, AttrValue::text("down")));
    }
    if field.file_unit() == Some(EPOCH_SECONDS_UNIT) {
        attributes.push((attr::TIME_ORIGIN, AttrValue::text(TIME_ORIGIN)));
    }
    attributes
}

/// Name of the text metadata field tagged as the trajectory identifier.
///
/// `dataset_id` when the record governs it, otherwise the first text field.
pub fn trajectory_id_field(fields: &[TypedField]) -> Option<&str> {
    let is_text = |field: &&TypedField| field.kind == FieldKind::Text;
    fields
        .iter()
        .filter(is_text)
        .find(|field| field.name == DATASET_ID)
        .or_else(|| fields.iter().find(is_text))
        .map(|field| field.name.as_str())
}
