use std::collections::BTreeMap;

use crate::catalog::{standard_data_fields, standard_metadata_fields};
use crate::error::{ModelError, Result};
use crate::TypedField;

/// An ordered, immutable set of recognized fields.
///
/// Names are unique except for repeatable fields, which are kept once in
/// lookup but may be registered any number of times.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<TypedField>,
    by_name: BTreeMap<String, usize>,
}

impl FieldRegistry {
    /// Build a registry, rejecting empty or duplicate names.
    pub fn build(fields: Vec<TypedField>) -> Result<Self> {
        let mut by_name = BTreeMap::new();
        let mut kept = Vec::with_capacity(fields.len());
        for field in fields {
            if field.name.trim().is_empty() {
                return Err(ModelError::EmptyFieldName);
            }
            if let Some(&existing) = by_name.get(&field.name) {
                let existing: &TypedField = &kept[existing];
                if existing.repeatable && field.repeatable {
                    continue;
                }
                return Err(ModelError::DuplicateField { name: field.name });
            }
            by_name.insert(field.name.clone(), kept.len());
            kept.push(field);
        }
        Ok(Self {
            fields: kept,
            by_name,
        })
    }

    /// Registry of the standard table columns.
    pub fn standard_data() -> Self {
        Self::from_catalog(standard_data_fields())
    }

    /// Registry of the standard dataset metadata fields.
    pub fn standard_metadata() -> Self {
        Self::from_catalog(standard_metadata_fields())
    }

    // Catalog names are distinct constants, so the build cannot fail.
    fn from_catalog(fields: Vec<TypedField>) -> Self {
        let mut by_name = BTreeMap::new();
        for (idx, field) in fields.iter().enumerate() {
            by_name.entry(field.name.clone()).or_insert(idx);
        }
        debug_assert_eq!(by_name.len(), fields.len());
        Self { fields, by_name }
    }

    pub fn resolve(&self, name: &str) -> Result<&TypedField> {
        self.get(name).ok_or_else(|| ModelError::unknown_field(name))
    }

    pub fn get(&self, name: &str) -> Option<&TypedField> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All fields in registration order.
    pub fn fields(&self) -> &[TypedField] {
        &self.fields
    }

    /// Fields that carry standardized values (excludes `other`/`unknown`).
    pub fn usable_fields(&self) -> impl Iterator<Item = &TypedField> {
        self.fields.iter().filter(|field| field.is_usable())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names;

    #[test]
    fn standard_registries_resolve() {
        let data = FieldRegistry::standard_data();
        assert!(data.resolve(names::LONGITUDE).is_ok());
        assert!(data.resolve(names::OTHER).is_ok());
        assert!(data.resolve("no_such_field").is_err());

        let metadata = FieldRegistry::standard_metadata();
        assert_eq!(metadata.fields()[0].name, names::DATASET_ID);
    }

    #[test]
    fn standard_catalogs_have_no_duplicates() {
        let data = FieldRegistry::build(standard_data_fields()).unwrap();
        assert_eq!(data.len(), standard_data_fields().len());
        let metadata = FieldRegistry::build(standard_metadata_fields()).unwrap();
        assert_eq!(metadata.len(), standard_metadata_fields().len());
    }
}
