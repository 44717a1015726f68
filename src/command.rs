//! Command definitions
//!
//! Fully-parsed store operations issued by a front end, and their results.
//! The front end builds a `Command`, hands it to `Engine::execute`, and
//! renders the returned `Outcome` (or error) however it likes.

use crate::record::{FieldValue, Key};
use crate::store::Predicate;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Add,
    Find,
    Update,
    Delete,
    List,
    Search,
    Save,
}

/// A store operation with its arguments
#[derive(Debug, Clone)]
pub enum Command<R> {
    /// Add a record
    Add(R),

    /// Look up a record by key
    Find { key: Key },

    /// Overwrite some fields of a record
    Update {
        key: Key,
        changes: Vec<(String, FieldValue)>,
    },

    /// Remove a record
    Delete { key: Key },

    /// All records in insertion order
    List,

    /// Records whose field satisfies a predicate
    Search { field: String, predicate: Predicate },

    /// Write the store to its data file
    Save,
}

impl<R> Command<R> {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Add(_) => CommandType::Add,
            Command::Find { .. } => CommandType::Find,
            Command::Update { .. } => CommandType::Update,
            Command::Delete { .. } => CommandType::Delete,
            Command::List => CommandType::List,
            Command::Search { .. } => CommandType::Search,
            Command::Save => CommandType::Save,
        }
    }

    /// True for commands that change the store contents
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::Add(_) | Command::Update { .. } | Command::Delete { .. }
        )
    }
}

/// Successful result of a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<R> {
    /// Record stored under this key
    Added(Key),

    /// Copy of the record found
    Found(R),

    Updated,

    /// The record that was removed
    Deleted(R),

    /// Records from `List` or `Search`, in insertion order
    Records(Vec<R>),

    Saved,
}
