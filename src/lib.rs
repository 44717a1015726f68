//! # Rollbook
//!
//! A small record store for console record managers:
//! - Ordered, bounded collection of fixed-shape records keyed by integer
//! - Add / find / partial update / delete with compaction
//! - Linear-scan search by field (equality or substring)
//! - Flat-file persistence, one comma-separated record per line
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Console front end (bin)                     │
//! │          menus, prompts, rendering of outcomes               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command / Outcome
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Engine                                │
//! │           open (hydrate) · execute · save · close            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ RecordStore │          │ Line codec  │
//!   │   (Vec<R>)  │─────────▶│ (data file) │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │   Record    │
//!   │  schemas    │
//!   └─────────────┘
//! ```
//!
//! The library never prints; every operation returns a `Result` for the
//! front end to render.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod store;
pub mod command;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, RollbookError};
pub use config::{Config, DuplicateKeys, KeyPolicy};
pub use command::{Command, Outcome};
pub use engine::Engine;
pub use record::{Book, Enrollment, FieldValue, Key, Record, Student, Task};
pub use store::{LoadReport, LoadStop, Predicate, RecordStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Rollbook
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
