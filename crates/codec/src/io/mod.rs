//! Serialization and deserialization for code tables.
//!
//! This module provides functionality for saving and loading tables as
//! JSON, either as a `table.json` file in a directory or as a string.

pub mod format;
pub mod load;
pub mod save;

pub use format::{SerializedTable, FORMAT_VERSION, TABLE_FILE};
pub use load::TableLoader;
pub use save::TableSaver;
