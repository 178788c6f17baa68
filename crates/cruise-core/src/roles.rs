use std::collections::BTreeSet;
use std::fmt;

use cruise_model::TypedField;
use cruise_model::names::{
    DATE, DAY_OF_MONTH, DAY_OF_YEAR, HOUR_OF_DAY, LATITUDE, LONGITUDE, MINUTE_OF_HOUR,
    MONTH_OF_YEAR, SAMPLE_DEPTH, SECOND_OF_DAY, SECOND_OF_MINUTE, TIME, TIME_OF_DAY, TIMESTAMP,
    YEAR,
};

use crate::error::{Result, TableError};

/// Commonly referenced column meanings, resolved once per table by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemanticRole {
    Longitude,
    Latitude,
    SampleDepth,
    Time,
    Timestamp,
    Date,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    DayOfYear,
    SecondOfDay,
    TimeOfDay,
}

impl SemanticRole {
    pub const ALL: [Self; 15] = [
        Self::Longitude,
        Self::Latitude,
        Self::SampleDepth,
        Self::Time,
        Self::Timestamp,
        Self::Date,
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::DayOfYear,
        Self::SecondOfDay,
        Self::TimeOfDay,
    ];

    /// Variable name of the field that carries this role.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Longitude => LONGITUDE,
            Self::Latitude => LATITUDE,
            Self::SampleDepth => SAMPLE_DEPTH,
            Self::Time => TIME,
            Self::Timestamp => TIMESTAMP,
            Self::Date => DATE,
            Self::Year => YEAR,
            Self::Month => MONTH_OF_YEAR,
            Self::Day => DAY_OF_MONTH,
            Self::Hour => HOUR_OF_DAY,
            Self::Minute => MINUTE_OF_HOUR,
            Self::Second => SECOND_OF_MINUTE,
            Self::DayOfYear => DAY_OF_YEAR,
            Self::SecondOfDay => SECOND_OF_DAY,
            Self::TimeOfDay => TIME_OF_DAY,
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.field_name() == name)
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Column position of each semantic role, computed once from a field list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleIndex {
    slots: [Option<usize>; SemanticRole::ALL.len()],
}

impl RoleIndex {
    /// Resolve roles for `fields`.
    ///
    /// Fails on empty names and on any repeated name other than a
    /// repeatable field.
    pub fn build(fields: &[TypedField]) -> Result<Self> {
        let mut index = Self::default();
        let mut seen = BTreeSet::new();
        for (column, field) in fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(TableError::EmptyFieldName { column });
            }
            if field.repeatable {
                continue;
            }
            if !seen.insert(field.name.as_str()) {
                return Err(TableError::DuplicateColumn {
                    name: field.name.clone(),
                });
            }
            if let Some(role) = SemanticRole::from_field_name(&field.name) {
                index.slots[role.slot()] = Some(column);
            }
        }
        Ok(index)
    }

    pub fn get(&self, role: SemanticRole) -> Option<usize> {
        self.slots[role.slot()]
    }

    pub fn has(&self, role: SemanticRole) -> bool {
        self.get(role).is_some()
    }

    pub fn has_all(&self, roles: &[SemanticRole]) -> bool {
        roles.iter().all(|role| self.has(*role))
    }

    /// Column of `role`, or a [`TableError::MissingColumn`] naming it.
    pub fn require(&self, role: SemanticRole) -> Result<usize> {
        self.get(role).ok_or(TableError::MissingColumn {
            role: role.field_name(),
        })
    }
}
