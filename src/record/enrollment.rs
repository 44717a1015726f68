//! Enrollment record (in-memory student roster)

use crate::error::Result;

use super::{FieldCursor, FieldKind, FieldSpec, FieldValue, Key, Record};

#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub roll: Key,
    pub name: String,
    pub course: String,
    pub year: i64,
}

impl Enrollment {
    pub fn new(roll: Key, name: impl Into<String>, course: impl Into<String>, year: i64) -> Self {
        Self {
            roll,
            name: name.into(),
            course: course.into(),
            year,
        }
    }
}

impl Record for Enrollment {
    const KIND: &'static str = "enrollment";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("roll", FieldKind::Int),
        FieldSpec::new("name", FieldKind::Text),
        FieldSpec::new("course", FieldKind::Text),
        FieldSpec::new("year", FieldKind::Int),
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
            FieldValue::Text(self.course.clone()),
            FieldValue::Int(self.year),
        ]
    }

    fn from_fields(fields: Vec<FieldValue>) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::KIND, Self::FIELDS, fields)?;
        Ok(Self {
            roll: cursor.int("roll")?,
            name: cursor.text("name")?,
            course: cursor.text("course")?,
            year: cursor.int("year")?,
        })
    }
}
