//! Main codec implementation.
//!
//! This module provides the high-level `Codec` struct that applies a code
//! table to text: greedy longest-token matching on encode, prefix matching on
//! decode, and optional folding of the bit-string into a dense alphabet.

use crate::convert::{convert_base, Alphabet};
use crate::io::{TableLoader, TableSaver};
use crate::utils::{CacheKey, CacheStats, CodecCache, Operation};
use hufftable_core::{CodeTable, HuffmanError, Result};
use hufftable_training::{TableBuilder, TableConfig};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Marker bit prepended before base conversion so leading zero bits survive.
const MARKER_BIT: char = '1';

/// How the decoder narrows the candidate codes at each position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeStrategy {
    /// Scan the bucket of codes sharing the leading `min_code_length` bits
    #[default]
    PrefixBucket,
    /// Look up every code length from `min_code_length` upward
    CodeLength,
}

/// Configuration for a codec.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Alphabet used by compact mode
    pub compact_alphabet: Alphabet,
    /// Decoder candidate selection
    pub decode_strategy: DecodeStrategy,
    /// Capacity of the result cache (0 disables caching)
    pub cache_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compact_alphabet: Alphabet::base65(),
            decode_strategy: DecodeStrategy::PrefixBucket,
            cache_capacity: 0,
        }
    }
}

/// Builder for creating a codec.
pub struct CodecBuilder {
    table_config: TableConfig,
    config: CodecConfig,
    cache: Option<CodecCache>,
}

impl Default for CodecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecBuilder {
    /// Create a new codec builder with default configuration.
    pub fn new() -> Self {
        Self {
            table_config: TableConfig::default(),
            config: CodecConfig::default(),
            cache: None,
        }
    }

    /// Set the maximum token length used to build the table (0 = whole words).
    pub fn max_token_length(mut self, length: usize) -> Self {
        self.table_config.max_token_length = length;
        self
    }

    /// Set the table version.
    pub fn version(mut self, version: u32) -> Self {
        self.table_config.version = version;
        self
    }

    /// Enable or disable parallel occurrence counting.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.table_config.parallel = parallel;
        self
    }

    /// Set the compact alphabet.
    pub fn compact_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.config.compact_alphabet = alphabet;
        self
    }

    /// Set the decode strategy.
    pub fn decode_strategy(mut self, strategy: DecodeStrategy) -> Self {
        self.config.decode_strategy = strategy;
        self
    }

    /// Enable a result cache with the given capacity.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Use an existing cache object. Takes precedence over `cache_capacity`.
    pub fn with_cache(mut self, cache: CodecCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build the table from a corpus and create the codec.
    pub fn build<S>(self, corpus: &[S]) -> Result<Codec>
    where
        S: AsRef<str> + Sync,
    {
        let table = TableBuilder::new(self.table_config.clone()).build(corpus)?;
        Ok(self.with_table(Arc::new(table)))
    }

    /// Create the codec around an existing table.
    ///
    /// Table construction settings (`max_token_length`, `version`,
    /// `parallel`) are ignored; the supplied table keeps its own.
    pub fn with_table(self, table: Arc<CodeTable>) -> Codec {
        let cache = match self.cache {
            Some(cache) => Some(cache),
            None if self.config.cache_capacity > 0 => {
                Some(CodecCache::with_capacity(self.config.cache_capacity))
            }
            None => None,
        };

        debug!(
            entries = table.len(),
            decode_strategy = ?self.config.decode_strategy,
            cache_capacity = cache.as_ref().map_or(0, |c| c.capacity()),
            "codec ready"
        );

        Codec {
            table,
            binary: Alphabet::binary(),
            config: self.config,
            cache: cache.map(Mutex::new),
        }
    }
}

/// Main codec struct.
///
/// Holds a shared, immutable code table. Encode and decode take `&self`, so
/// one codec can serve concurrent callers.
pub struct Codec {
    /// Code table
    table: Arc<CodeTable>,
    /// Configuration
    config: CodecConfig,
    /// Alphabet of raw output
    binary: Alphabet,
    /// Optional result cache
    cache: Option<Mutex<CodecCache>>,
}

impl Codec {
    /// Create a codec with default configuration.
    pub fn new(table: Arc<CodeTable>) -> Self {
        CodecBuilder::new().with_table(table)
    }

    /// Create a codec builder.
    pub fn builder() -> CodecBuilder {
        CodecBuilder::new()
    }

    /// Get a reference to the code table.
    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Get the configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode text.
    ///
    /// # Arguments
    /// * `text` - The text to encode
    /// * `compact` - Fold the bit-string into the compact alphabet
    ///
    /// # Errors
    /// `UnknownToken` if some position matches no token in the table.
    pub fn encode(&self, text: &str, compact: bool) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        self.cached(Operation::Encode, text, compact, || {
            let bits = self.encode_bits(text)?;
            if !compact {
                return Ok(bits);
            }

            let mut marked = String::with_capacity(bits.len() + 1);
            marked.push(MARKER_BIT);
            marked.push_str(&bits);
            convert_base(&marked, &self.binary, &self.config.compact_alphabet)
        })
    }

    /// Encode a batch of texts (parallelized).
    pub fn encode_batch<S>(&self, texts: &[S], compact: bool) -> Result<Vec<String>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        texts
            .par_iter()
            .map(|text| self.encode(text.as_ref(), compact))
            .collect::<std::result::Result<Vec<_>, _>>()
    }

    /// Decode back to text.
    ///
    /// # Arguments
    /// * `encoded` - Output of [`Codec::encode`]
    /// * `compact` - Whether `encoded` is in the compact alphabet
    ///
    /// # Errors
    /// `InvalidSymbol` if compact input has a symbol outside the alphabet,
    /// `UnknownCode` if the bits do not decompose into known codes.
    pub fn decode(&self, encoded: &str, compact: bool) -> Result<String> {
        if encoded.is_empty() {
            return Ok(String::new());
        }

        self.cached(Operation::Decode, encoded, compact, || {
            if !compact {
                return self.decode_bits(encoded);
            }

            let marked = convert_base(encoded, &self.config.compact_alphabet, &self.binary)?;
            let bits = marked
                .strip_prefix(MARKER_BIT)
                .ok_or_else(|| HuffmanError::UnknownCode(marked.clone()))?;
            self.decode_bits(bits)
        })
    }

    /// Get cache statistics, if a cache is configured.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| lock(cache).stats())
    }

    /// Save the code table to a directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        TableSaver::new(&self.table).save(path)
    }

    /// Load a code table from a directory and create a codec with default
    /// configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let table = TableLoader::load(path)?;
        Ok(Self::new(Arc::new(table)))
    }

    fn cached<F>(&self, operation: Operation, input: &str, compact: bool, compute: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        let Some(cache) = &self.cache else {
            return compute();
        };

        let key = CacheKey::new(operation, input, compact);
        if let Some(hit) = lock(cache).get(&key) {
            return Ok(hit);
        }

        // Computed outside the lock; concurrent misses write identical values.
        let value = compute()?;
        lock(cache).insert(key, value.clone());
        Ok(value)
    }

    fn encode_bits(&self, text: &str) -> Result<String> {
        let mut bits = String::new();
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];
            let (token_len, code) = self
                .best_code(rest)
                .ok_or_else(|| HuffmanError::UnknownToken(rest.to_string()))?;

            bits.push_str(code);
            pos += token_len;
        }

        Ok(bits)
    }

    /// Longest token at the start of `rest`: its byte length and code.
    fn best_code(&self, rest: &str) -> Option<(usize, &str)> {
        let table = &*self.table;

        if table.is_whole_words() {
            // Every token that can prefix `rest` shares its first character
            let first = rest.chars().next()?;
            return table
                .tokens_starting_with(first)
                .find(|entry| rest.starts_with(entry.token.as_str()))
                .map(|entry| (entry.token.len(), entry.code.as_str()));
        }

        // Byte offset after 1, 2, ... max_token_length characters
        let ends: Vec<usize> = rest
            .char_indices()
            .skip(1)
            .map(|(i, _)| i)
            .chain(std::iter::once(rest.len()))
            .take(table.max_token_length())
            .collect();

        ends.iter()
            .rev()
            .find_map(|&end| table.code_for(&rest[..end]).map(|code| (end, code)))
    }

    fn decode_bits(&self, bits: &str) -> Result<String> {
        let mut text = String::new();
        let mut pos = 0;

        while pos < bits.len() {
            let rest = &bits[pos..];
            let (token, code_len) = match self.config.decode_strategy {
                DecodeStrategy::PrefixBucket => self.match_by_prefix(rest),
                DecodeStrategy::CodeLength => self.match_by_length(rest),
            }
            .ok_or_else(|| HuffmanError::UnknownCode(rest.to_string()))?;

            text.push_str(token);
            pos += code_len;
        }

        Ok(text)
    }

    fn match_by_prefix(&self, rest: &str) -> Option<(&str, usize)> {
        let min = self.table.min_code_length();
        let prefix = rest.get(..min).unwrap_or(rest);

        // A zero-length code would never advance the scan
        self.table
            .codes_with_prefix(prefix)
            .find(|entry| !entry.code.is_empty() && rest.starts_with(entry.code.as_str()))
            .map(|entry| (entry.token.as_str(), entry.code.len()))
    }

    fn match_by_length(&self, rest: &str) -> Option<(&str, usize)> {
        let min = self.table.min_code_length().max(1);
        let max = self.table.max_code_length().min(rest.len());

        (min..=max).find_map(|len| {
            rest.get(..len)
                .and_then(|candidate| self.table.token_for(candidate))
                .map(|token| (token, len))
        })
    }
}

fn lock(cache: &Mutex<CodecCache>) -> MutexGuard<'_, CodecCache> {
    // A panic while holding the lock cannot leave a half-written entry
    cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("entries", &self.table.len())
            .field("max_token_length", &self.table.max_token_length())
            .field("decode_strategy", &self.config.decode_strategy)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}
