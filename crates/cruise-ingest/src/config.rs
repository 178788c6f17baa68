//! Dataset declarations.
//!
//! A declaration is a TOML file mapping CSV headers to registry field names
//! and giving dataset-level metadata:
//!
//! ```toml
//! delimiter = ","
//!
//! [columns]
//! Lon = "longitude"
//! Lat = "latitude"
//! Depth = { field = "sample_depth", missing = ["-999"] }
//! Timestamp = "date_time"
//! Notes = "other"
//!
//! [metadata]
//! dataset_id = "33RO20140113"
//! platform_name = "Ronald H. Brown"
//! ```
//!
//! Headers without a declaration are treated as `unknown` and dropped during
//! promotion.

use std::collections::BTreeMap;
use std::path::Path;

use cruise_core::UserColumn;
use cruise_model::names::UNKNOWN;
use cruise_model::{FieldKind, FieldRegistry, MetadataRecord, Value};
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Declared meaning of one CSV column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    /// Field name only.
    Field(String),
    /// Field name plus extra cell tokens that mean "no value".
    Detailed {
        field: String,
        #[serde(default)]
        missing: Vec<String>,
    },
}

impl ColumnSpec {
    pub fn field(&self) -> &str {
        match self {
            Self::Field(field) | Self::Detailed { field, .. } => field,
        }
    }

    pub fn missing_tokens(&self) -> &[String] {
        match self {
            Self::Field(_) => &[],
            Self::Detailed { missing, .. } => missing,
        }
    }
}

/// Column declarations and metadata for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// CSV field delimiter (default `,`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnSpec>,
    #[serde(default)]
    pub metadata: BTreeMap<String, toml::Value>,
}

impl DatasetConfig {
    /// Parse a declaration from TOML text.
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        let delimiter = self.delimiter.unwrap_or(',');
        u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(IngestError::InvalidDelimiter { delimiter })
    }

    /// User columns for a CSV with `headers`, in header order.
    ///
    /// Undeclared headers become `unknown` columns. Declarations naming a
    /// header the CSV lacks are logged and ignored.
    pub fn user_columns(&self, headers: &[String]) -> Vec<UserColumn> {
        for declared in self.columns.keys() {
            if !headers.contains(declared) {
                tracing::warn!(column = %declared, "declared column not found in CSV");
            }
        }
        headers
            .iter()
            .map(|header| match self.columns.get(header) {
                Some(spec) => spec
                    .missing_tokens()
                    .iter()
                    .fold(UserColumn::new(header, spec.field()), |column, token| {
                        column.with_missing_token(token)
                    }),
                None => {
                    tracing::debug!(column = %header, "undeclared column");
                    UserColumn::new(header, UNKNOWN)
                }
            })
            .collect()
    }

    /// Metadata record governed by `registry`, filled from `[metadata]`.
    pub fn build_metadata(&self, registry: &FieldRegistry) -> Result<MetadataRecord> {
        let mut record = MetadataRecord::new(registry);
        for (name, raw) in &self.metadata {
            let field = registry.resolve(name)?;
            let value = metadata_value(name, field.kind, raw)?;
            record.set(name, value)?;
        }
        Ok(record)
    }
}

/// Load a declaration file.
pub fn load_config(path: &Path) -> Result<DatasetConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::from_io(path, e))?;
    let config = DatasetConfig::from_toml(&text).map_err(|source| IngestError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        columns = config.columns.len(),
        metadata = config.metadata.len(),
        "loaded dataset declaration"
    );
    Ok(config)
}

fn metadata_value(name: &str, kind: FieldKind, raw: &toml::Value) -> Result<Value> {
    let value = match (kind, raw) {
        (FieldKind::Text, toml::Value::String(text)) => Some(Value::Text(text.clone())),
        (FieldKind::Integer, toml::Value::Integer(number)) => {
            i32::try_from(*number).ok().map(Value::Integer)
        }
        (FieldKind::Real, toml::Value::Float(number)) => Some(Value::Real(*number)),
        #[allow(clippy::cast_precision_loss)]
        (FieldKind::Real, toml::Value::Integer(number)) => Some(Value::Real(*number as f64)),
        _ => None,
    };
    value.ok_or_else(|| IngestError::MetadataValue {
        field: name.to_string(),
        expected: kind,
        found: raw.type_str(),
    })
}
