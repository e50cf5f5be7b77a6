//! Save functionality for code tables.

use super::format::{SerializedTable, FORMAT_VERSION, TABLE_FILE};
use hufftable_core::{CodeTable, HuffmanError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Table saver - handles writing tables to disk.
pub struct TableSaver<'a> {
    table: &'a CodeTable,
}

impl<'a> TableSaver<'a> {
    /// Create a new table saver.
    pub fn new(table: &'a CodeTable) -> Self {
        Self { table }
    }

    /// Save the table to a directory.
    ///
    /// This writes a single `table.json` file.
    ///
    /// # Arguments
    /// * `path` - Directory path to save to
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|err| HuffmanError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let file_path = path.join(TABLE_FILE);
        let file = File::create(&file_path).map_err(|err| HuffmanError::Io {
            path: file_path.clone(),
            err,
        })?;

        self.write_to(BufWriter::new(file), &file_path)?;

        debug!(path = %file_path.display(), entries = self.table.len(), "saved code table");
        Ok(())
    }

    /// Write pretty JSON to `writer` and flush it. Flush errors are reported
    /// against `file_path`.
    fn write_to<W: Write>(&self, mut writer: W, file_path: &Path) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, &self.serialize())
            .map_err(|e| HuffmanError::Save(format!("Failed to serialize table: {}", e)))?;

        writer.flush().map_err(|err| HuffmanError::Io {
            path: file_path.to_path_buf(),
            err,
        })
    }

    /// Serialize the table to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.serialize())?)
    }

    /// Serialize the table to a structure.
    pub fn serialize(&self) -> SerializedTable {
        let codes = self
            .table
            .forward()
            .iter()
            .map(|entry| (entry.token.to_string(), entry.code.clone()))
            .collect();

        SerializedTable {
            format_version: FORMAT_VERSION.to_string(),
            table_version: self.table.version(),
            max_token_length: self.table.max_token_length(),
            codes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hufftable_training::build_table;

    #[test]
    fn test_serialize() {
        let table = build_table(&["aaabbcc"], 1).unwrap();
        let serialized = TableSaver::new(&table).serialize();

        assert_eq!(serialized.codes.len(), 3);
        assert_eq!(serialized.codes["a"], "0");
        assert_eq!(serialized.max_token_length, 1);
        assert_eq!(serialized.format_version, FORMAT_VERSION);
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let table = build_table(&["hello", "world"], 2).unwrap();

        TableSaver::new(&table).save(dir.path()).unwrap();

        assert!(dir.path().join(TABLE_FILE).exists());
    }

    /// Accepts every write, fails on flush.
    struct FailingFlush;

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn test_flush_failure_is_reported() {
        let table = build_table(&["aaabbcc"], 1).unwrap();
        let path = Path::new("table.json");

        let result = TableSaver::new(&table).write_to(BufWriter::new(FailingFlush), path);
        assert!(matches!(result, Err(HuffmanError::Io { ref path, .. }) if path.ends_with(TABLE_FILE)));
    }

    #[test]
    fn test_saved_file_is_complete() {
        let dir = tempfile::tempdir().unwrap();
        let table = build_table(&["hello", "world"], 2).unwrap();
        let saver = TableSaver::new(&table);

        saver.save(dir.path()).unwrap();

        let written = std::fs::read_to_string(dir.path().join(TABLE_FILE)).unwrap();
        let parsed: SerializedTable = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, saver.serialize());
    }
}
