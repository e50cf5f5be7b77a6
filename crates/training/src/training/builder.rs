//! Code-table construction.
//!
//! Turns occurrence counts into a prefix-free code with a Huffman-style
//! greedy merge: the two lowest-ranked nodes are merged until one remains,
//! and the surviving tree is flattened into token -> code pairs.

use super::counter::OccurrenceCounter;
use hufftable_core::{CodeTable, HuffmanError, OccurrenceQueue, Result};
use tracing::debug;

/// Configuration for table construction.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Longest substring considered a token (0 = whole corpus entries)
    pub max_token_length: usize,
    /// Version number stored with the table
    pub version: u32,
    /// Whether to count occurrences in parallel
    pub parallel: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_token_length: 1,
            version: 0,
            parallel: true,
        }
    }
}

/// Code-table builder.
///
/// Building the same corpus with the same configuration always produces the
/// same table.
pub struct TableBuilder {
    config: TableConfig,
}

impl TableBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    /// Create a new builder with default configuration and the given
    /// maximum token length.
    pub fn with_max_token_length(max_token_length: usize) -> Self {
        Self::new(TableConfig {
            max_token_length,
            ..Default::default()
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Build a code table from a corpus.
    ///
    /// # Arguments
    /// * `corpus` - Sample tokens used to estimate frequencies
    ///
    /// # Errors
    /// `InvalidConfiguration` for an empty corpus or an empty entry.
    pub fn build<S>(&self, corpus: &[S]) -> Result<CodeTable>
    where
        S: AsRef<str> + Sync,
    {
        if corpus.is_empty() {
            return Err(HuffmanError::InvalidConfiguration(
                "corpus must contain at least one entry".to_string(),
            ));
        }

        let max_token_length = self.config.max_token_length;
        let counter = if self.config.parallel {
            OccurrenceCounter::count_parallel(corpus, max_token_length)?
        } else {
            OccurrenceCounter::count_sequential(corpus, max_token_length)?
        };

        debug!(
            entries = counter.entry_count(),
            tokens = counter.len(),
            max_token_length,
            "counted occurrences"
        );

        // Leaves enter the queue in ascending token order; their sequence
        // numbers are the last tie-break.
        let counts = counter.into_sorted();
        let mut queue = OccurrenceQueue::with_capacity(counts.len());
        for (token, count) in counts {
            queue.push_leaf(token, count);
        }

        let root = queue.into_root().ok_or_else(|| {
            HuffmanError::InvalidConfiguration("corpus produced no tokens".to_string())
        })?;

        debug!(total = root.count, depth = root.depth, "merge tree complete");

        CodeTable::from_codes(root.tree.flatten(), max_token_length, self.config.version)
    }
}

/// Build a code table with default settings.
///
/// Shorthand for `TableBuilder::with_max_token_length(max_token_length).build(corpus)`.
pub fn build_table<S>(corpus: &[S], max_token_length: usize) -> Result<CodeTable>
where
    S: AsRef<str> + Sync,
{
    TableBuilder::with_max_token_length(max_token_length).build(corpus)
}
