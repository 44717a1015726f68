//! Task record (to-do list)

use crate::error::Result;

use super::{FieldCursor, FieldKind, FieldSpec, FieldValue, Key, Record};

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Key,
    pub description: String,
    pub completed: bool,
}

impl Task {
    /// New pending task. The id is assigned when it is added to a store.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: 0,
            description: description.into(),
            completed: false,
        }
    }

    /// Mark the task as done (no-op if it already is)
    pub fn complete(&mut self) {
        self.completed = true;
    }
}

impl Record for Task {
    const KIND: &'static str = "task";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id", FieldKind::Int),
        FieldSpec::new("description", FieldKind::Text),
        FieldSpec::new("completed", FieldKind::Bool),
    ];

    fn key(&self) -> Key {
        self.id
    }

    fn set_key(&mut self, key: Key) {
        self.id = key;
    }

    fn to_fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Int(self.id),
            FieldValue::Text(self.description.clone()),
            FieldValue::Bool(self.completed),
        ]
    }

    fn from_fields(fields: Vec<FieldValue>) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::KIND, Self::FIELDS, fields)?;
        Ok(Self {
            id: cursor.int("id")?,
            description: cursor.text("description")?,
            completed: cursor.bool("completed")?,
        })
    }
}
