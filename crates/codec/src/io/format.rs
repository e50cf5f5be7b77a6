//! Format definitions for table serialization.
//!
//! A persisted table is the plain token -> code mapping plus the parameters
//! needed to rebuild every lookup view without re-running frequency analysis.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current persisted format version.
pub const FORMAT_VERSION: &str = "1.0";

/// File name used inside a table directory.
pub const TABLE_FILE: &str = "table.json";

/// Complete table serialization format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedTable {
    /// Format version
    pub format_version: String,
    /// User-supplied table version
    pub table_version: u32,
    /// Maximum token length used at construction (0 = whole words)
    pub max_token_length: usize,
    /// Token -> code mapping, sorted by token for stable output
    pub codes: BTreeMap<String, String>,
}

impl SerializedTable {
    /// Check whether this crate can read the format version.
    pub fn is_supported(&self) -> bool {
        let major = |v: &str| v.split('.').next().map(str::to_string);
        major(&self.format_version) == major(FORMAT_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_roundtrip() {
        let table_data = SerializedTable {
            format_version: FORMAT_VERSION.to_string(),
            table_version: 3,
            max_token_length: 1,
            codes: {
                let mut map = BTreeMap::new();
                map.insert("a".to_string(), "0".to_string());
                map.insert("b".to_string(), "1".to_string());
                map
            },
        };

        let json = serde_json::to_string(&table_data).unwrap();
        let deserialized: SerializedTable = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, table_data);
        assert!(deserialized.is_supported());
    }

    #[test]
    fn test_unsupported_version() {
        let table_data = SerializedTable {
            format_version: "2.0".to_string(),
            table_version: 0,
            max_token_length: 1,
            codes: BTreeMap::new(),
        };
        assert!(!table_data.is_supported());
    }
}
