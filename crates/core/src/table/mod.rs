//! Code table data structures.
//!
//! This module contains the immutable code table and the build-time
//! occurrence nodes that are merged into it.

pub mod code_table;
pub mod occurrence;

pub use code_table::{CodeEntry, CodeTable, MAX_LENGTH_WHOLE_WORDS};
pub use occurrence::{MergeTree, OccurrenceNode, OccurrenceQueue};
