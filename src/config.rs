//! Configuration for Rollbook
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, RollbookError};

/// Default maximum number of records held by a store
pub const DEFAULT_CAPACITY: usize = 100;

/// Configuration for a record store and its engine
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Persistence Configuration
    // -------------------------------------------------------------------------
    /// Flat file the engine loads on open and rewrites on save.
    /// `None` keeps the store purely in memory.
    pub data_file: Option<PathBuf>,

    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Maximum number of records held at once (`None` = unbounded)
    pub capacity: Option<usize>,

    /// Who decides the key of a newly added record
    pub key_policy: KeyPolicy,

    /// What to do with a caller-supplied key that is already in use
    pub duplicate_keys: DuplicateKeys,
}

/// Key assignment policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPolicy {
    /// The store assigns `1 + records ever added`; keys are never reused
    Assigned,

    /// The caller supplies the key on the record itself
    CallerSupplied,
}

/// Handling of duplicate caller-supplied keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKeys {
    /// Reject the add with `DuplicateKey`
    Reject,

    /// Accept the duplicate; lookups then return the earliest match
    Permit,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            capacity: Some(DEFAULT_CAPACITY),
            key_policy: KeyPolicy::CallerSupplied,
            duplicate_keys: DuplicateKeys::Reject,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration for values a store cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.capacity == Some(0) {
            return Err(RollbookError::Config(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Persist the store to this file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = Some(path.into());
        self
    }

    /// Keep the store in memory only
    pub fn in_memory(mut self) -> Self {
        self.config.data_file = None;
        self
    }

    /// Set the maximum record count
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = Some(capacity);
        self
    }

    /// Remove the record count bound
    pub fn unbounded(mut self) -> Self {
        self.config.capacity = None;
        self
    }

    pub fn key_policy(mut self, policy: KeyPolicy) -> Self {
        self.config.key_policy = policy;
        self
    }

    pub fn duplicate_keys(mut self, handling: DuplicateKeys) -> Self {
        self.config.duplicate_keys = handling;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
