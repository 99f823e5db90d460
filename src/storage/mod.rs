//! Storage engine
//!
//! Holds the single authoritative table of live records keyed by
//! `<ClassName>.<id>` and mirrors it to one JSON file.
//!
//! # Design Principles
//!
//! - One table per `FileStorage`; no process-wide state
//! - Every persist rewrites the whole file (O(total records) per save)
//! - Reload replaces the table, it never merges
//! - Deterministic key order, so unchanged tables persist byte-identically
//! - Load failures are errors; records are never dropped

mod errors;
mod file;

pub use errors::{StorageError, StorageResult};
pub use file::{FileStorage, DEFAULT_FILE_PATH};
