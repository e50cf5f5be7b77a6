//! Hufftable-core - prefix-free code tables
//!
//! This crate provides the data structures shared by table construction and
//! the codec, independent of how a table is built or applied.
//!
//! # Features
//!
//! - Immutable `CodeTable` with longest-token-first and shortest-code-first
//!   views plus first-character and code-prefix indices
//! - Occurrence nodes and an 8-ary min-heap for the Huffman merge
//! - Error handling shared by every hufftable crate
//!
//! # Example
//!
//! ```rust
//! use hufftable_core::CodeTable;
//!
//! let table = CodeTable::from_codes(
//!     vec![("a".into(), "0".to_string()), ("b".into(), "1".to_string())],
//!     1,
//!     0,
//! )?;
//! assert_eq!(table.code_for("b"), Some("1"));
//! # Ok::<(), hufftable_core::HuffmanError>(())
//! ```

pub mod error;
pub use error::{HuffmanError, Result};

pub mod table;
pub use table::{
    CodeEntry, CodeTable, MergeTree, OccurrenceNode, OccurrenceQueue, MAX_LENGTH_WHOLE_WORDS,
};
