//! Field values and field schemas

use std::fmt;

use crate::error::{Result, RollbookError};

/// Scalar value of a single record field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

/// Type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
    Text,
    Bool,
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Bool(_) => FieldKind::Bool,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{:.2}", v),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Text => "text",
            FieldKind::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// Characters a text field may not contain: the file format has no escaping
pub const FORBIDDEN_TEXT_CHARS: [char; 3] = [',', '\n', '\r'];

/// Name, type and limits of one record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Maximum length in bytes (text fields only)
    pub max_len: Option<usize>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            max_len: None,
        }
    }

    pub const fn max_len(self, bytes: usize) -> Self {
        Self {
            max_len: Some(bytes),
            ..self
        }
    }

    /// Check that `value` fits this field
    pub fn check(&self, value: &FieldValue) -> Result<()> {
        if value.kind() != self.kind {
            return Err(RollbookError::invalid(
                self.name,
                format!("expected {}, got {}", self.kind, value.kind()),
            ));
        }

        if let FieldValue::Float(v) = value {
            if !v.is_finite() {
                return Err(RollbookError::invalid(self.name, "number must be finite"));
            }
        }

        if let FieldValue::Text(text) = value {
            if let Some(c) = text.chars().find(|c| FORBIDDEN_TEXT_CHARS.contains(c)) {
                return Err(RollbookError::invalid(
                    self.name,
                    format!("text may not contain {:?}", c),
                ));
            }
            if let Some(max) = self.max_len {
                if text.len() > max {
                    return Err(RollbookError::invalid(
                        self.name,
                        format!("{} bytes exceeds limit of {}", text.len(), max),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Consumes a record's field values in schema order
///
/// Used by `Record::from_fields` implementations to pull typed values out of
/// a field vector with arity and type checking.
pub struct FieldCursor {
    kind: &'static str,
    values: std::vec::IntoIter<FieldValue>,
}

impl FieldCursor {
    pub fn new(kind: &'static str, schema: &[FieldSpec], values: Vec<FieldValue>) -> Result<Self> {
        if values.len() != schema.len() {
            return Err(RollbookError::Parse(format!(
                "{} expects {} fields, got {}",
                kind,
                schema.len(),
                values.len()
            )));
        }
        Ok(Self {
            kind,
            values: values.into_iter(),
        })
    }

    fn next(&mut self, name: &str) -> Result<FieldValue> {
        self.values.next().ok_or_else(|| {
            RollbookError::Parse(format!("{} is missing field {}", self.kind, name))
        })
    }

    pub fn int(&mut self, name: &str) -> Result<i64> {
        match self.next(name)? {
            FieldValue::Int(v) => Ok(v),
            other => Err(mismatch(name, FieldKind::Int, &other)),
        }
    }

    pub fn float(&mut self, name: &str) -> Result<f64> {
        match self.next(name)? {
            FieldValue::Float(v) => Ok(v),
            other => Err(mismatch(name, FieldKind::Float, &other)),
        }
    }

    pub fn text(&mut self, name: &str) -> Result<String> {
        match self.next(name)? {
            FieldValue::Text(v) => Ok(v),
            other => Err(mismatch(name, FieldKind::Text, &other)),
        }
    }

    pub fn bool(&mut self, name: &str) -> Result<bool> {
        match self.next(name)? {
            FieldValue::Bool(v) => Ok(v),
            other => Err(mismatch(name, FieldKind::Bool, &other)),
        }
    }
}

fn mismatch(name: &str, expected: FieldKind, got: &FieldValue) -> RollbookError {
    RollbookError::invalid(name, format!("expected {}, got {}", expected, got.kind()))
}
