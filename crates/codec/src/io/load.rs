//! Load functionality for persisted code tables.

use super::format::{SerializedTable, TABLE_FILE};
use compact_str::CompactString;
use hufftable_core::{CodeTable, HuffmanError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Table loader - handles reading persisted tables.
pub struct TableLoader;

impl TableLoader {
    /// Load a table from a directory.
    ///
    /// Expects a `table.json` file in the given directory.
    ///
    /// # Arguments
    /// * `path` - Directory path to load from
    pub fn load(path: &Path) -> Result<CodeTable> {
        let file_path = path.join(TABLE_FILE);
        let file = File::open(&file_path).map_err(|err| HuffmanError::Io {
            path: file_path.clone(),
            err,
        })?;

        let reader = BufReader::new(file);
        let serialized: SerializedTable = serde_json::from_reader(reader)
            .map_err(|e| HuffmanError::Load(format!("Failed to deserialize table: {}", e)))?;

        debug!(path = %file_path.display(), entries = serialized.codes.len(), "loaded code table");
        Self::deserialize(serialized)
    }

    /// Load a table from a JSON string.
    pub fn from_json(json: &str) -> Result<CodeTable> {
        let serialized: SerializedTable = serde_json::from_str(json)?;
        Self::deserialize(serialized)
    }

    /// Rebuild a table from its serialized structure.
    ///
    /// All views are rebuilt and the mapping is checked to be prefix-free.
    pub fn deserialize(data: SerializedTable) -> Result<CodeTable> {
        if !data.is_supported() {
            return Err(HuffmanError::Load(format!(
                "Unsupported table format version {}",
                data.format_version
            )));
        }

        CodeTable::from_codes(
            data.codes
                .into_iter()
                .map(|(token, code)| (CompactString::from(token), code)),
            data.max_token_length,
            data.table_version,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::format::FORMAT_VERSION;
    use crate::io::save::TableSaver;
    use hufftable_training::{TableBuilder, TableConfig};
    use std::collections::BTreeMap;

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let table = TableBuilder::new(TableConfig {
            max_token_length: 2,
            version: 4,
            ..Default::default()
        })
        .build(&["hello", "world"])
        .unwrap();

        TableSaver::new(&table).save(dir.path()).unwrap();
        let loaded = TableLoader::load(dir.path()).unwrap();

        assert_eq!(loaded.forward(), table.forward());
        assert_eq!(loaded.reverse(), table.reverse());
        assert_eq!(loaded.version(), 4);
        assert_eq!(loaded.max_token_length(), 2);
    }

    #[test]
    fn test_json_roundtrip() {
        let table = TableBuilder::with_max_token_length(0)
            .build(&["ag", "vk", "gg_z", "ag"])
            .unwrap();

        let json = TableSaver::new(&table).to_json().unwrap();
        let loaded = TableLoader::from_json(&json).unwrap();

        assert_eq!(loaded.forward(), table.forward());
        assert!(loaded.is_whole_words());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TableLoader::load(dir.path()),
            Err(HuffmanError::Io { .. })
        ));
    }

    #[test]
    fn test_rejects_non_prefix_free_mapping() {
        let mut codes = BTreeMap::new();
        codes.insert("a".to_string(), "0".to_string());
        codes.insert("b".to_string(), "00".to_string());

        let result = TableLoader::deserialize(SerializedTable {
            format_version: FORMAT_VERSION.to_string(),
            table_version: 0,
            max_token_length: 1,
            codes,
        });
        assert!(matches!(result, Err(HuffmanError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let mut codes = BTreeMap::new();
        codes.insert("a".to_string(), "0".to_string());
        codes.insert("b".to_string(), "1".to_string());

        let result = TableLoader::deserialize(SerializedTable {
            format_version: "9.1".to_string(),
            table_version: 0,
            max_token_length: 1,
            codes,
        });
        assert!(matches!(result, Err(HuffmanError::Load(_))));
    }
}
