//! Field predicates for linear-scan search

use crate::error::{Result, RollbookError};
use crate::record::{FieldKind, FieldSpec, FieldValue};

/// Match condition applied to one field of each record
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals the value exactly (any field type)
    Equals(FieldValue),

    /// Text field contains the substring (case-sensitive)
    Contains(String),
}

impl Predicate {
    pub fn equals(value: impl Into<FieldValue>) -> Self {
        Predicate::Equals(value.into())
    }

    pub fn contains(needle: impl Into<String>) -> Self {
        Predicate::Contains(needle.into())
    }

    /// Check that this predicate can be applied to `spec`
    pub(crate) fn check(&self, spec: &FieldSpec) -> Result<()> {
        match self {
            Predicate::Equals(value) if value.kind() != spec.kind => Err(RollbookError::invalid(
                spec.name,
                format!("cannot compare {} field with {} value", spec.kind, value.kind()),
            )),
            Predicate::Contains(_) if spec.kind != FieldKind::Text => Err(RollbookError::invalid(
                spec.name,
                format!("substring search needs a text field, not {}", spec.kind),
            )),
            _ => Ok(()),
        }
    }

    pub fn matches(&self, value: &FieldValue) -> bool {
        match self {
            Predicate::Equals(expected) => expected == value,
            Predicate::Contains(needle) => value
                .as_text()
                .map_or(false, |text| text.contains(needle.as_str())),
        }
    }
}
