//! Record Module
//!
//! Fixed-shape records stored by a `RecordStore`.
//!
//! ## Responsibilities
//! - Describe each record shape as an ordered list of typed fields
//! - Convert records to and from field vectors (used by the line codec)
//! - Field-level access for partial updates and searches
//!
//! ## Schema Convention
//! The first field of every schema is the record key. It is an `Int` field
//! and cannot be changed through `set_field`.
//!
//! ```text
//! Student     roll, name(<=49 bytes), age, marks
//! Enrollment  roll, name, course, year
//! Book        id, title, author, issued
//! Task        id, description, completed
//! ```

mod value;
mod student;
mod enrollment;
mod book;
mod task;

use std::fmt::Debug;

use crate::error::{Result, RollbookError};

pub use value::{FieldCursor, FieldKind, FieldSpec, FieldValue, FORBIDDEN_TEXT_CHARS};
pub use student::{Student, MAX_NAME_BYTES};
pub use enrollment::Enrollment;
pub use book::Book;
pub use task::Task;

/// Record key
pub type Key = i64;

/// A fixed-shape record identified by an integer key
pub trait Record: Clone + Debug {
    /// Human-readable record type name
    const KIND: &'static str;

    /// Field schema in file order; the first entry is the key
    const FIELDS: &'static [FieldSpec];

    fn key(&self) -> Key;

    fn set_key(&mut self, key: Key);

    /// All field values in schema order
    fn to_fields(&self) -> Vec<FieldValue>;

    /// Build a record from field values in schema order
    fn from_fields(fields: Vec<FieldValue>) -> Result<Self>;

    /// Schema entry of the key field
    fn key_field() -> &'static FieldSpec {
        &Self::FIELDS[0]
    }

    /// Position of a named field in the schema
    fn field_index(name: &str) -> Result<usize> {
        Self::FIELDS
            .iter()
            .position(|spec| spec.name == name)
            .ok_or_else(|| RollbookError::UnknownField {
                field: name.to_string(),
            })
    }

    /// Read a single field by name
    fn field(&self, name: &str) -> Result<FieldValue> {
        let index = Self::field_index(name)?;
        Ok(self.to_fields().swap_remove(index))
    }

    /// Overwrite a single non-key field by name
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        let index = Self::field_index(name)?;
        if index == 0 {
            return Err(RollbookError::ImmutableField {
                field: name.to_string(),
            });
        }
        Self::FIELDS[index].check(&value)?;

        let mut fields = self.to_fields();
        fields[index] = value;
        *self = Self::from_fields(fields)?;
        Ok(())
    }

    /// Check every field against its schema entry
    fn validate(&self) -> Result<()> {
        Self::FIELDS
            .iter()
            .zip(self.to_fields())
            .try_for_each(|(spec, value)| spec.check(&value))
    }
}
