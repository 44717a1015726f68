//! Engine Module
//!
//! Owns one record store together with its configuration and data file.
//!
//! ## Responsibilities
//! - Hydrate the store from the data file on open
//! - Route commands to store operations
//! - Write the store back on save and on close
//!
//! ## Failure Policy
//! - Load: a missing or unreadable file is not an error; the engine starts
//!   empty and logs why. A partial load keeps what was parsed.
//! - Save: any failure is returned as `RollbookError::Save`, since the file on
//!   disk may now be incomplete.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::command::{Command, Outcome};
use crate::config::Config;
use crate::error::{Result, RollbookError};
use crate::record::{Key, Record};
use crate::store::{LoadReport, RecordStore};

/// Record store plus persistence lifecycle
pub struct Engine<R: Record> {
    /// Engine configuration
    config: Config,

    /// The records
    store: RecordStore<R>,

    /// Mutations since the last successful save
    dirty: bool,

    /// Result of loading the data file on open
    load_report: Option<LoadReport>,
}

impl<R: Record> Engine<R> {
    /// Open an engine, loading `config.data_file` if one is configured
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let mut store = RecordStore::new(&config);

        let load_report = match &config.data_file {
            Some(path) => Self::hydrate(&mut store, path),
            None => None,
        };

        info!(
            kind = R::KIND,
            records = store.len(),
            capacity = ?store.capacity(),
            persistent = config.data_file.is_some(),
            "engine opened"
        );

        Ok(Self {
            config,
            store,
            dirty: false,
            load_report,
        })
    }

    /// Open with a data file (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_file(path).build())
    }

    /// Open an engine that never touches disk
    pub fn in_memory(config: Config) -> Result<Self> {
        Self::open(Config {
            data_file: None,
            ..config
        })
    }

    /// Execute a command
    ///
    /// Routes commands to the matching store operation
    pub fn execute(&mut self, command: Command<R>) -> Result<Outcome<R>> {
        debug!(kind = R::KIND, command = ?command.command_type(), "execute");
        let mutation = command.is_mutation();

        let outcome = match command {
            Command::Add(record) => Outcome::Added(self.store.add(record)?),
            Command::Find { key } => Outcome::Found(self.store.find(key)?.clone()),
            Command::Update { key, changes } => {
                let changes: Vec<(&str, _)> = changes
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.clone()))
                    .collect();
                self.store.update(key, &changes)?;
                Outcome::Updated
            }
            Command::Delete { key } => Outcome::Deleted(self.store.delete(key)?),
            Command::List => Outcome::Records(self.store.list().to_vec()),
            Command::Search { field, predicate } => Outcome::Records(
                self.store
                    .search(&field, &predicate)?
                    .into_iter()
                    .cloned()
                    .collect(),
            ),
            Command::Save => {
                self.save()?;
                Outcome::Saved
            }
        };

        if mutation {
            self.dirty = true;
        }
        Ok(outcome)
    }

    /// Apply a domain mutation to one record (see `RecordStore::modify`)
    pub fn modify<T, F>(&mut self, key: Key, f: F) -> Result<T>
    where
        F: FnOnce(&mut R) -> Result<T>,
    {
        let output = self.store.modify(key, f)?;
        self.dirty = true;
        Ok(output)
    }

    /// Overwrite the data file with the current records
    ///
    /// Open-truncate-write-sync. No-op for in-memory engines.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.config.data_file.as_deref() else {
            return Ok(());
        };

        Self::write_file(&self.store, path).map_err(|e| match e {
            RollbookError::Io(source) => RollbookError::Save {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        self.dirty = false;
        info!(kind = R::KIND, records = self.store.len(), path = %path.display(), "store saved");
        Ok(())
    }

    /// Close the engine, saving if it is persistent
    pub fn close(mut self) -> Result<()> {
        self.save()?;
        debug!(kind = R::KIND, "engine closed");
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the data file path (`None` for in-memory engines)
    pub fn data_file(&self) -> Option<&Path> {
        self.config.data_file.as_deref()
    }

    /// How the data file load went (`None` if nothing was read)
    pub fn load_report(&self) -> Option<&LoadReport> {
        self.load_report.as_ref()
    }

    /// Whether the store changed since it was opened or last saved
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Load the data file into `store`, falling back to an empty store
    fn hydrate(store: &mut RecordStore<R>, path: &Path) -> Option<LoadReport> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no data file yet, starting empty");
                return None;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot open data file, starting empty");
                return None;
            }
        };

        match store.load_from(BufReader::new(file)) {
            Ok(report) => {
                info!(path = %path.display(), loaded = report.loaded, "data file loaded");
                Some(report)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read data file, starting empty");
                None
            }
        }
    }

    fn write_file(store: &RecordStore<R>, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        store.save_to(&mut writer)?;

        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    }
}
