//! RecordStore implementation
//!
//! Vec-backed, bounded, insertion-ordered record collection.

use std::io::{BufRead, ErrorKind, Write};

use tracing::{debug, warn};

use crate::config::{Config, DuplicateKeys, KeyPolicy};
use crate::error::{Result, RollbookError};
use crate::record::{FieldValue, Key, Record};

use super::codec;
use super::{LoadReport, LoadStop, Predicate};

/// Ordered, bounded collection of records with unique keys
///
/// ## Invariants
/// - No two records share a key (unless `DuplicateKeys::Permit` is set)
/// - `len() <= capacity` whenever a capacity is configured
/// - Iteration order is insertion order
/// - Assigned keys are `1 + records ever added` and are never reused
#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    /// Records in insertion order
    records: Vec<R>,

    /// Maximum number of records (`None` = unbounded)
    capacity: Option<usize>,

    key_policy: KeyPolicy,

    duplicate_keys: DuplicateKeys,

    /// Highest key handed out so far under `KeyPolicy::Assigned`
    last_assigned: Key,
}

impl<R: Record> RecordStore<R> {
    /// Create an empty store from the store settings in `config`
    pub fn new(config: &Config) -> Self {
        Self {
            records: Vec::new(),
            capacity: config.capacity,
            key_policy: config.key_policy,
            duplicate_keys: config.duplicate_keys,
            last_assigned: 0,
        }
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Append a record and return its key
    ///
    /// Under `KeyPolicy::Assigned` the record's own key is ignored and
    /// replaced with the next key. Fails without touching the store when the
    /// store is full, the key is taken, no assigned key is left, or a field
    /// is invalid.
    pub fn add(&mut self, mut record: R) -> Result<Key> {
        if let Some(capacity) = self.capacity {
            if self.records.len() >= capacity {
                return Err(RollbookError::CapacityExceeded { capacity });
            }
        }

        match self.key_policy {
            KeyPolicy::Assigned => {
                let key = self.next_key().ok_or(RollbookError::KeyExhausted {
                    last: self.last_assigned,
                })?;
                record.set_key(key);
            }
            KeyPolicy::CallerSupplied => {
                let key = record.key();
                if self.duplicate_keys == DuplicateKeys::Reject && self.contains(key) {
                    return Err(RollbookError::DuplicateKey { key });
                }
            }
        }

        record.validate()?;

        let key = record.key();
        if self.key_policy == KeyPolicy::Assigned {
            self.last_assigned = key;
        }
        self.records.push(record);

        debug!(kind = R::KIND, key, len = self.records.len(), "record added");
        Ok(key)
    }

    /// Find the first record with `key`
    pub fn find(&self, key: Key) -> Result<&R> {
        self.records
            .iter()
            .find(|r| r.key() == key)
            .ok_or(RollbookError::NotFound { key })
    }

    /// Check whether a record with `key` exists
    pub fn contains(&self, key: Key) -> bool {
        self.position(key).is_some()
    }

    /// Overwrite the named fields of the record with `key`
    ///
    /// Only the listed fields change. Either every change applies or none
    /// does; the key field cannot be updated.
    pub fn update(&mut self, key: Key, changes: &[(&str, FieldValue)]) -> Result<()> {
        let index = self.index_of(key)?;

        let mut updated = self.records[index].clone();
        for (name, value) in changes {
            updated.set_field(name, value.clone())?;
        }
        self.records[index] = updated;

        debug!(kind = R::KIND, key, fields = changes.len(), "record updated");
        Ok(())
    }

    /// Apply a domain mutation to the record with `key`
    ///
    /// `f` runs on a copy; the copy replaces the stored record only if `f`
    /// succeeds, the key is unchanged and every field is still valid.
    pub fn modify<T, F>(&mut self, key: Key, f: F) -> Result<T>
    where
        F: FnOnce(&mut R) -> Result<T>,
    {
        let index = self.index_of(key)?;

        let mut updated = self.records[index].clone();
        let output = f(&mut updated)?;

        if updated.key() != key {
            return Err(RollbookError::ImmutableField {
                field: R::key_field().name.to_string(),
            });
        }
        updated.validate()?;
        self.records[index] = updated;

        debug!(kind = R::KIND, key, "record modified");
        Ok(output)
    }

    /// Remove the record with `key`, shifting later records left
    pub fn delete(&mut self, key: Key) -> Result<R> {
        let index = self.index_of(key)?;
        let removed = self.records.remove(index);

        debug!(kind = R::KIND, key, len = self.records.len(), "record deleted");
        Ok(removed)
    }

    // =========================================================================
    // Listing & Search
    // =========================================================================

    /// Iterate over records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// All records in insertion order
    pub fn list(&self) -> &[R] {
        &self.records
    }

    /// All records whose `field` satisfies `predicate`, in insertion order
    pub fn search(&self, field: &str, predicate: &Predicate) -> Result<Vec<&R>> {
        let index = R::field_index(field)?;
        predicate.check(&R::FIELDS[index])?;

        Ok(self
            .records
            .iter()
            .filter(|r| predicate.matches(&r.to_fields()[index]))
            .collect())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Replace the store contents with records parsed from `reader`
    ///
    /// Loading stops silently at the first malformed line (including a
    /// duplicate key under `DuplicateKeys::Reject`) or when the store is
    /// full; blank lines are skipped. A read error leaves the store as it
    /// was.
    pub fn load_from<B: BufRead>(&mut self, reader: B) -> Result<LoadReport> {
        let mut loaded: Vec<R> = Vec::new();
        let mut stop = None;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    stop = Some(LoadStop::Malformed {
                        line: line_no,
                        reason: e.to_string(),
                    });
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            if line.trim().is_empty() {
                continue;
            }

            if self.capacity.map_or(false, |cap| loaded.len() >= cap) {
                stop = Some(LoadStop::CapacityReached { line: line_no });
                break;
            }

            let record = match codec::decode_line::<R>(&line) {
                Ok(record) => record,
                Err(e) => {
                    stop = Some(LoadStop::Malformed {
                        line: line_no,
                        reason: e.to_string(),
                    });
                    break;
                }
            };

            if self.duplicate_keys == DuplicateKeys::Reject
                && loaded.iter().any(|r| r.key() == record.key())
            {
                stop = Some(LoadStop::Malformed {
                    line: line_no,
                    reason: format!("duplicate key {}", record.key()),
                });
                break;
            }

            loaded.push(record);
        }

        if self.key_policy == KeyPolicy::Assigned {
            let highest = loaded.iter().map(Record::key).max().unwrap_or(0);
            self.last_assigned = self.last_assigned.max(highest);
        }
        self.records = loaded;

        if let Some(reason) = &stop {
            warn!(kind = R::KIND, loaded = self.records.len(), ?reason, "load stopped early");
        }

        Ok(LoadReport {
            loaded: self.records.len(),
            stop,
        })
    }

    /// Write every record to `writer`, one line each
    pub fn save_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for record in &self.records {
            writeln!(writer, "{}", codec::encode_line(record))?;
        }
        writer.flush()?;
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records (`None` = unbounded)
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Whether another add would exceed capacity
    pub fn is_full(&self) -> bool {
        self.capacity.map_or(false, |cap| self.records.len() >= cap)
    }

    /// Key the next add will receive under `KeyPolicy::Assigned`
    ///
    /// `None` once `Key::MAX` has been handed out or loaded.
    pub fn next_key(&self) -> Option<Key> {
        self.last_assigned.checked_add(1)
    }

    pub fn key_policy(&self) -> KeyPolicy {
        self.key_policy
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn position(&self, key: Key) -> Option<usize> {
        self.records.iter().position(|r| r.key() == key)
    }

    fn index_of(&self, key: Key) -> Result<usize> {
        self.position(key).ok_or(RollbookError::NotFound { key })
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl<'a, R: Record> IntoIterator for &'a RecordStore<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
