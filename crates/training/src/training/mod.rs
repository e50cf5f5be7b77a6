//! Table construction infrastructure.
//!
//! This module provides occurrence counting and the Huffman merge that
//! turns counts into a code table.

pub mod builder;
pub mod counter;

pub use builder::{build_table, TableBuilder, TableConfig};
pub use counter::OccurrenceCounter;
