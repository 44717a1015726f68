//! Store Module
//!
//! The in-memory record store and its flat-file format.
//!
//! ## Responsibilities
//! - Own the authoritative, insertion-ordered sequence of records
//! - Enforce key uniqueness and the capacity bound
//! - Add / find / update / delete with compaction
//! - Linear-scan search by field
//! - Bulk load from and save to the line format (see `codec`)
//!
//! ## Data Structure Choice
//! A plain `Vec` scanned linearly:
//! - Insertion order is the display and search order
//! - `Vec::remove` shifts later records left, keeping slots contiguous
//! - Stores are small (tens to hundreds of records), so no index

pub mod codec;
mod search;
mod table;

pub use search::Predicate;
pub use table::RecordStore;

/// Outcome of a bulk load
///
/// A load never fails on bad data: it keeps every record parsed before the
/// first unusable line and reports where and why it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of records now in the store
    pub loaded: usize,

    /// Why loading ended early (`None` = stream exhausted)
    pub stop: Option<LoadStop>,
}

impl LoadReport {
    /// True when every line of the stream was loaded
    pub fn is_complete(&self) -> bool {
        self.stop.is_none()
    }
}

/// Reason a load ended before the end of the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStop {
    /// Line `line` (1-based) could not be parsed; it and everything after it
    /// were skipped
    Malformed { line: usize, reason: String },

    /// The store was full when line `line` was reached
    CapacityReached { line: usize },
}
