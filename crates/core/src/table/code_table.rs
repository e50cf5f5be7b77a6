//! Immutable token <-> code table and its lookup views.
//!
//! The table keeps two orderings of the same entries plus secondary indices:
//!
//! - `forward`: longest token first, used by the encoder to prefer the
//!   longest known token at each text position
//! - `reverse`: shortest code first, used by the decoder
//! - `by_start_char`: first character of a token -> forward positions
//! - `by_code_prefix`: leading `min_code_length` bits of a code -> reverse
//!   positions

use crate::error::{HuffmanError, Result};
use ahash::AHashMap;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

/// `max_token_length` value selecting whole-word mode (no substring splitting).
pub const MAX_LENGTH_WHOLE_WORDS: usize = 0;

/// A single token and its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    /// The token text
    pub token: CompactString,
    /// The code, a string of `'0'`/`'1'`
    pub code: String,
}

/// Prefix-free token -> code mapping, read-only once built.
#[derive(Debug, Clone)]
pub struct CodeTable {
    /// Construction parameter (0 = whole words)
    max_token_length: usize,
    /// User-supplied table version
    version: u32,
    /// Entries ordered by descending token length
    forward: Vec<CodeEntry>,
    /// Entries ordered by ascending code length
    reverse: Vec<CodeEntry>,
    /// Token -> position in `forward`
    token_index: AHashMap<CompactString, usize>,
    /// Code -> position in `reverse`
    code_index: AHashMap<String, usize>,
    /// First character -> positions in `forward`
    by_start_char: AHashMap<char, Vec<usize>>,
    /// Leading bits -> positions in `reverse`
    by_code_prefix: AHashMap<String, Vec<usize>>,
    min_code_length: usize,
    max_code_length: usize,
}

impl CodeTable {
    /// Build a table from raw `(token, code)` pairs.
    ///
    /// Used both after construction and when loading a persisted table. The
    /// mapping is validated: tokens must be non-empty and unique, codes must
    /// be binary, and the whole set must be prefix-free.
    pub fn from_codes<I>(codes: I, max_token_length: usize, version: u32) -> Result<Self>
    where
        I: IntoIterator<Item = (CompactString, String)>,
    {
        let mut entries: Vec<CodeEntry> = codes
            .into_iter()
            .map(|(token, code)| CodeEntry { token, code })
            .collect();

        Self::validate(&entries, max_token_length)?;

        // forward: longest token first, ties by token text
        entries.sort_by_cached_key(|e| (Reverse(e.token.chars().count()), e.token.clone()));
        let forward = entries;

        // reverse: shortest code first, ties by code text
        let mut reverse = forward.clone();
        reverse.sort_by(|a, b| {
            a.code
                .len()
                .cmp(&b.code.len())
                .then_with(|| a.code.cmp(&b.code))
        });

        let min_code_length = reverse.first().map_or(0, |e| e.code.len());
        let max_code_length = reverse.last().map_or(0, |e| e.code.len());

        let mut token_index = AHashMap::with_capacity(forward.len());
        let mut by_start_char: AHashMap<char, Vec<usize>> = AHashMap::new();
        for (pos, entry) in forward.iter().enumerate() {
            token_index.insert(entry.token.clone(), pos);
            if let Some(first) = entry.token.chars().next() {
                by_start_char.entry(first).or_default().push(pos);
            }
        }

        let mut code_index = AHashMap::with_capacity(reverse.len());
        let mut by_code_prefix: AHashMap<String, Vec<usize>> = AHashMap::new();
        for (pos, entry) in reverse.iter().enumerate() {
            code_index.insert(entry.code.clone(), pos);
            by_code_prefix
                .entry(entry.code[..min_code_length].to_string())
                .or_default()
                .push(pos);
        }

        debug!(
            entries = forward.len(),
            max_token_length,
            min_code_length,
            max_code_length,
            "code table ready"
        );

        Ok(Self {
            max_token_length,
            version,
            forward,
            reverse,
            token_index,
            code_index,
            by_start_char,
            by_code_prefix,
            min_code_length,
            max_code_length,
        })
    }

    fn validate(entries: &[CodeEntry], max_token_length: usize) -> Result<()> {
        if entries.is_empty() {
            return Err(HuffmanError::InvalidConfiguration(
                "code table must contain at least one entry".to_string(),
            ));
        }

        let mut seen = ahash::AHashSet::with_capacity(entries.len());
        for entry in entries {
            if entry.token.is_empty() {
                return Err(HuffmanError::InvalidConfiguration(
                    "empty tokens are not allowed".to_string(),
                ));
            }
            if !seen.insert(entry.token.as_str()) {
                return Err(HuffmanError::InvalidConfiguration(format!(
                    "duplicate token \"{}\"",
                    entry.token
                )));
            }
            if max_token_length != MAX_LENGTH_WHOLE_WORDS
                && entry.token.chars().count() > max_token_length
            {
                return Err(HuffmanError::InvalidConfiguration(format!(
                    "token \"{}\" is longer than the maximum token length {}",
                    entry.token, max_token_length
                )));
            }
            if !is_binary(&entry.code) {
                return Err(HuffmanError::InvalidConfiguration(format!(
                    "code \"{}\" for token \"{}\" is not a bit-string",
                    entry.code, entry.token
                )));
            }
        }

        let mut codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
        codes.sort_unstable();
        // In lexical order a code that prefixes any other code also prefixes
        // its immediate successor.
        for pair in codes.windows(2) {
            if pair[1].starts_with(pair[0]) {
                return Err(HuffmanError::InvalidConfiguration(format!(
                    "code \"{}\" is a prefix of \"{}\"",
                    pair[0], pair[1]
                )));
            }
        }

        Ok(())
    }

    /// The construction parameter (0 = whole words).
    #[inline]
    pub fn max_token_length(&self) -> usize {
        self.max_token_length
    }

    /// Whether the table was built in whole-word mode.
    #[inline]
    pub fn is_whole_words(&self) -> bool {
        self.max_token_length == MAX_LENGTH_WHOLE_WORDS
    }

    /// User-supplied table version.
    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Check if the table is empty. Validated tables never are.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Length of the shortest code.
    #[inline]
    pub fn min_code_length(&self) -> usize {
        self.min_code_length
    }

    /// Length of the longest code.
    #[inline]
    pub fn max_code_length(&self) -> usize {
        self.max_code_length
    }

    /// Entries, longest token first.
    pub fn forward(&self) -> &[CodeEntry] {
        &self.forward
    }

    /// Entries, shortest code first.
    pub fn reverse(&self) -> &[CodeEntry] {
        &self.reverse
    }

    /// Get the code for a token.
    #[inline]
    pub fn code_for(&self, token: &str) -> Option<&str> {
        self.token_index
            .get(token)
            .map(|&pos| self.forward[pos].code.as_str())
    }

    /// Get the token for a code.
    #[inline]
    pub fn token_for(&self, code: &str) -> Option<&str> {
        self.code_index
            .get(code)
            .map(|&pos| self.reverse[pos].token.as_str())
    }

    /// Tokens starting with `first`, longest first.
    pub fn tokens_starting_with(&self, first: char) -> impl Iterator<Item = &CodeEntry> + '_ {
        self.by_start_char
            .get(&first)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.forward[pos])
    }

    /// Codes whose first `min_code_length` bits equal `prefix`, shortest first.
    pub fn codes_with_prefix(&self, prefix: &str) -> impl Iterator<Item = &CodeEntry> + '_ {
        self.by_code_prefix
            .get(prefix)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.reverse[pos])
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.reverse.iter().map(|e| e.code.as_str()).collect();
        codes.sort_unstable();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }
}

fn is_binary(code: &str) -> bool {
    code.bytes().all(|b| b == b'0' || b == b'1')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(codes: &[(&str, &str)], max_token_length: usize) -> Result<CodeTable> {
        CodeTable::from_codes(
            codes
                .iter()
                .map(|&(t, c)| (CompactString::new(t), c.to_string())),
            max_token_length,
            0,
        )
    }

    #[test]
    fn test_lookups() {
        let table = table(&[("a", "0"), ("b", "10"), ("c", "11")], 1).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.code_for("a"), Some("0"));
        assert_eq!(table.code_for("c"), Some("11"));
        assert_eq!(table.code_for("d"), None);
        assert_eq!(table.token_for("10"), Some("b"));
        assert_eq!(table.token_for("1"), None);
        assert_eq!(table.min_code_length(), 1);
        assert_eq!(table.max_code_length(), 2);
        assert!(!table.is_whole_words());
    }

    #[test]
    fn test_view_ordering() {
        let table = table(
            &[("ab", "0"), ("abc", "100"), ("b", "101"), ("a", "11")],
            MAX_LENGTH_WHOLE_WORDS,
        )
        .unwrap();

        let forward: Vec<&str> = table.forward().iter().map(|e| e.token.as_str()).collect();
        assert_eq!(forward, vec!["abc", "ab", "a", "b"]);

        let reverse: Vec<&str> = table.reverse().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(reverse, vec!["0", "11", "100", "101"]);
    }

    #[test]
    fn test_start_char_index() {
        let table = table(
            &[("ab", "0"), ("abc", "100"), ("b", "101"), ("a", "11")],
            MAX_LENGTH_WHOLE_WORDS,
        )
        .unwrap();

        let tokens: Vec<&str> = table
            .tokens_starting_with('a')
            .map(|e| e.token.as_str())
            .collect();
        assert_eq!(tokens, vec!["abc", "ab", "a"]);
        assert_eq!(table.tokens_starting_with('z').count(), 0);
    }

    #[test]
    fn test_code_prefix_index() {
        let table = table(&[("a", "00"), ("b", "01"), ("c", "100"), ("d", "101"), ("e", "11")], 1)
            .unwrap();

        assert_eq!(table.min_code_length(), 2);
        let codes: Vec<&str> = table
            .codes_with_prefix("10")
            .map(|e| e.code.as_str())
            .collect();
        assert_eq!(codes, vec!["100", "101"]);
        assert_eq!(table.codes_with_prefix("11").count(), 1);
    }

    #[test]
    fn test_single_entry_empty_code() {
        let table = table(&[("a", "")], 1).unwrap();
        assert_eq!(table.min_code_length(), 0);
        assert_eq!(table.code_for("a"), Some(""));
        assert_eq!(table.codes_with_prefix("").count(), 1);
    }

    #[test]
    fn test_rejects_prefix_collision() {
        let err = table(&[("a", "0"), ("b", "01")], 1).unwrap_err();
        assert!(matches!(err, HuffmanError::InvalidConfiguration(_)));

        let err = table(&[("a", "1"), ("b", "1")], 1).unwrap_err();
        assert!(matches!(err, HuffmanError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_rejects_bad_entries() {
        assert!(table(&[], 1).is_err());
        assert!(table(&[("", "0"), ("a", "1")], 1).is_err());
        assert!(table(&[("a", "0"), ("b", "12")], 1).is_err());
        assert!(table(&[("ab", "0"), ("b", "1")], 1).is_err());
        assert!(table(&[("ab", "0"), ("b", "1")], 2).is_ok());
    }

    #[test]
    fn test_is_prefix_free() {
        let table = table(&[("a", "0"), ("b", "10"), ("c", "11")], 1).unwrap();
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_entry_serialization() {
        let table = table(&[("ab", "0"), ("c", "1")], 2).unwrap();
        let json = serde_json::to_string(&table.forward()[0]).unwrap();
        assert_eq!(json, r#"{"token":"ab","code":"0"}"#);

        let entry: CodeEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(&entry, &table.forward()[0]);
    }
}
