//! Student record (file-persisted student manager)

use crate::error::Result;

use super::{FieldCursor, FieldKind, FieldSpec, FieldValue, Key, Record};

/// Longest name a student record accepts, in bytes
pub const MAX_NAME_BYTES: usize = 49;

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub roll: Key,
    pub name: String,
    pub age: i64,
    pub marks: f64,
}

impl Student {
    pub fn new(roll: Key, name: impl Into<String>, age: i64, marks: f64) -> Self {
        Self {
            roll,
            name: name.into(),
            age,
            marks,
        }
    }
}

impl Record for Student {
    const KIND: &'static str = "student";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("roll", FieldKind::Int),
        FieldSpec::new("name", FieldKind::Text).max_len(MAX_NAME_BYTES),
        FieldSpec::new("age", FieldKind::Int),
        FieldSpec::new("marks", FieldKind::Float),
    ];

    fn key(&self) -> Key {
        self.roll
    }

    fn set_key(&mut self, key: Key) {
        self.roll = key;
    }

    fn to_fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Int(self.roll),
            FieldValue::Text(self.name.clone()),
            FieldValue::Int(self.age),
            FieldValue::Float(self.marks),
        ]
    }

    fn from_fields(fields: Vec<FieldValue>) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::KIND, Self::FIELDS, fields)?;
        Ok(Self {
            roll: cursor.int("roll")?,
            name: cursor.text("name")?,
            age: cursor.int("age")?,
            marks: cursor.float("marks")?,
        })
    }
}
