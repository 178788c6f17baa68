use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::{FieldRegistry, TypedField, Value};

/// Dataset-level attributes: one scalar value per governed field.
///
/// Every field always has a value; unset fields hold their kind's sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataRecord {
    fields: Vec<TypedField>,
    values: Vec<Value>,
}

impl MetadataRecord {
    /// Create a record governed by the usable fields of `registry`.
    pub fn new(registry: &FieldRegistry) -> Self {
        let fields: Vec<TypedField> = registry.usable_fields().cloned().collect();
        let values = fields.iter().map(TypedField::missing_value).collect();
        Self { fields, values }
    }

    pub fn fields(&self) -> &[TypedField] {
        &self.fields
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|field| field.name == name)
            .ok_or_else(|| ModelError::unknown_field(name))
    }

    /// Assign a value. The value's kind must match the field.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let idx = self.position(name)?;
        let field = &self.fields[idx];
        if !field.accepts(&value) {
            return Err(ModelError::KindMismatch {
                name: name.to_string(),
                expected: field.kind,
                actual: value.kind(),
            });
        }
        self.values[idx] = value;
        Ok(())
    }

    /// Reset a field back to its sentinel.
    pub fn clear(&mut self, name: &str) -> Result<()> {
        let idx = self.position(name)?;
        self.values[idx] = self.fields[idx].missing_value();
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.position(name).ok().map(|idx| &self.values[idx])
    }

    /// Whether `name` is unset. Unknown names count as missing.
    pub fn is_missing(&self, name: &str) -> bool {
        self.get(name).is_none_or(Value::is_missing)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name)
            .filter(|value| !value.is_missing())
            .and_then(Value::as_text)
    }

    pub fn real(&self, name: &str) -> Option<f64> {
        self.get(name)
            .filter(|value| !value.is_missing())
            .and_then(Value::as_real)
    }

    /// Field/value pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&TypedField, &Value)> {
        self.fields.iter().zip(self.values.iter())
    }
}
