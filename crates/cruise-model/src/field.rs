use std::fmt;

use serde::{Deserialize, Serialize};

use crate::names::{OTHER, UNKNOWN};
use crate::{FieldKind, Value};

/// Description of one typed variable: a table column or a metadata attribute.
///
/// Optional descriptive fields use `None` as the "absent" marker; absent
/// metadata is not written to files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedField {
    pub name: String,
    pub kind: FieldKind,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub standard_name: Option<String>,
    pub category: Option<String>,
    /// Accepted units; the first entry is the unit written to files.
    #[serde(default)]
    pub units: Vec<String>,
    /// Repeatable fields may appear more than once in a table and are
    /// excluded from name lookup.
    #[serde(default)]
    pub repeatable: bool,
}

impl TypedField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            display_name: None,
            description: None,
            standard_name: None,
            category: None,
            units: Vec::new(),
            repeatable: false,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn real(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Real)
    }

    /// The repeatable "other" declaration for supplementary columns.
    pub fn other() -> Self {
        let mut field = Self::text(OTHER)
            .with_display_name("(other)")
            .with_description("supplementary column not used in standardization");
        field.repeatable = true;
        field
    }

    /// The "unknown" declaration for columns with no usable type.
    pub fn unknown() -> Self {
        Self::text(UNKNOWN)
            .with_display_name("(unknown)")
            .with_description("column type not yet assigned")
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_standard_name(mut self, standard_name: impl Into<String>) -> Self {
        self.standard_name = Some(standard_name.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units = units.into_iter().map(Into::into).collect();
        self
    }

    /// Unit written to the file, if any.
    pub fn file_unit(&self) -> Option<&str> {
        self.units.first().map(String::as_str)
    }

    pub fn missing_value(&self) -> Value {
        self.kind.missing_value()
    }

    pub fn is_other(&self) -> bool {
        self.name == OTHER
    }

    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN
    }

    /// Whether columns of this field carry standardized data.
    pub fn is_usable(&self) -> bool {
        !self.is_other() && !self.is_unknown()
    }

    /// Whether `value` may be stored in a column of this field.
    pub fn accepts(&self, value: &Value) -> bool {
        value.kind() == self.kind
    }
}

impl fmt::Display for TypedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
