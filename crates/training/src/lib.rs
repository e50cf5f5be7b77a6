//! Hufftable-training - code-table construction
//!
//! This crate builds prefix-free code tables from a sample corpus.
//!
//! # Features
//!
//! - Overlapping-window occurrence counting with parallel processing support
//! - Deterministic Huffman merge (count, depth and insertion-order tie-breaks)
//! - Whole-word mode for corpora of complete tokens
//!
//! # Example
//!
//! ```rust
//! use hufftable_training::{TableBuilder, TableConfig};
//!
//! let builder = TableBuilder::new(TableConfig {
//!     max_token_length: 1,
//!     ..Default::default()
//! });
//! let table = builder.build(&["aaabbcc"])?;
//! assert_eq!(table.code_for("a"), Some("0"));
//! # Ok::<(), hufftable_training::HuffmanError>(())
//! ```

pub use hufftable_core::{HuffmanError, Result};

// Construction infrastructure
pub mod training;
pub use training::{build_table, OccurrenceCounter, TableBuilder, TableConfig};
