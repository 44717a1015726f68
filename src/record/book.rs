//! Book record (library catalog)

use crate::error::{Result, RollbookError};

use super::{FieldCursor, FieldKind, FieldSpec, FieldValue, Key, Record};

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: Key,
    pub title: String,
    pub author: String,
    pub issued: bool,
}

impl Book {
    /// New, available book. The id is assigned when it is added to a store.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            author: author.into(),
            issued: false,
        }
    }

    /// Mark the book as lent out
    pub fn issue(&mut self) -> Result<()> {
        if self.issued {
            return Err(RollbookError::AlreadyIssued { key: self.id });
        }
        self.issued = true;
        Ok(())
    }

    /// Mark the book as back on the shelf
    pub fn return_book(&mut self) -> Result<()> {
        if !self.issued {
            return Err(RollbookError::NotIssued { key: self.id });
        }
        self.issued = false;
        Ok(())
    }
}

impl Record for Book {
    const KIND: &'static str = "book";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id", FieldKind::Int),
        FieldSpec::new("title", FieldKind::Text),
        FieldSpec::new("author", FieldKind::Text),
        FieldSpec::new("issued", FieldKind::Bool),
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
            FieldValue::Text(self.title.clone()),
            FieldValue::Text(self.author.clone()),
            FieldValue::Bool(self.issued),
        ]
    }

    fn from_fields(fields: Vec<FieldValue>) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::KIND, Self::FIELDS, fields)?;
        Ok(Self {
            id: cursor.int("id")?,
            title: cursor.text("title")?,
            author: cursor.text("author")?,
            issued: cursor.bool("issued")?,
        })
    }
}
