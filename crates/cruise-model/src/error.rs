use thiserror::Error;

use crate::FieldKind;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("field name must not be empty")]
    EmptyFieldName,

    #[error("duplicate field registration: {name}")]
    DuplicateField { name: String },

    #[error("unknown field: {name}")]
    UnknownField { name: String },

    #[error("value for {name} must be {expected}, got {actual}")]
    KindMismatch {
        name: String,
        expected: FieldKind,
        actual: FieldKind,
    },
}

impl ModelError {
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
