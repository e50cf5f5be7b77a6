//! Occurrence counting for code-table construction.
//!
//! Counts how often every candidate token appears across the corpus, with
//! support for parallel processing.
//!
//! Substrings are counted with overlapping windows: for every window length
//! from `max_token_length` down to 1, each character offset of an entry adds
//! one occurrence of the window starting there. In whole-word mode each entry
//! counts once per appearance.

use ahash::AHashMap;
use compact_str::CompactString;
use hufftable_core::{HuffmanError, Result, MAX_LENGTH_WHOLE_WORDS};

/// Counter for token frequencies.
pub struct OccurrenceCounter {
    /// Window length bound (0 = whole words)
    max_token_length: usize,
    /// Token -> frequency count
    counts: AHashMap<CompactString, u64>,
    /// Number of corpus entries seen
    entries: u64,
}

impl OccurrenceCounter {
    /// Create a new counter.
    pub fn new(max_token_length: usize) -> Self {
        Self {
            max_token_length,
            counts: AHashMap::new(),
            entries: 0,
        }
    }

    /// Add a single corpus entry to the counter.
    ///
    /// Returns an error for an empty entry.
    pub fn add_entry(&mut self, entry: &str) -> Result<()> {
        check_entry(entry)?;
        count_entry(entry, self.max_token_length, &mut self.counts);
        self.entries += 1;
        Ok(())
    }

    /// Count a whole corpus sequentially.
    pub fn count_sequential<S: AsRef<str>>(corpus: &[S], max_token_length: usize) -> Result<Self> {
        let mut counter = Self::new(max_token_length);
        for entry in corpus {
            counter.add_entry(entry.as_ref())?;
        }
        Ok(counter)
    }

    /// Count a whole corpus in parallel.
    ///
    /// Produces the same counts as [`OccurrenceCounter::count_sequential`].
    pub fn count_parallel<S>(corpus: &[S], max_token_length: usize) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        for entry in corpus {
            check_entry(entry.as_ref())?;
        }

        let counts = corpus
            .par_iter()
            .map(|entry| {
                let mut counts: AHashMap<CompactString, u64> = AHashMap::new();
                count_entry(entry.as_ref(), max_token_length, &mut counts);
                counts
            })
            .reduce(AHashMap::new, |mut acc, counts| {
                for (token, count) in counts {
                    *acc.entry(token).or_insert(0) += count;
                }
                acc
            });

        Ok(Self {
            max_token_length,
            counts,
            entries: corpus.len() as u64,
        })
    }

    /// Get the count for a token.
    pub fn get(&self, token: &str) -> Option<u64> {
        self.counts.get(token).copied()
    }

    /// Get the number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Get the number of corpus entries seen.
    pub fn entry_count(&self) -> u64 {
        self.entries
    }

    /// The window length bound this counter was created with.
    pub fn max_token_length(&self) -> usize {
        self.max_token_length
    }

    /// Consume the counter, returning `(token, count)` pairs in ascending
    /// token order.
    ///
    /// The fixed order makes construction independent of hash iteration order.
    pub fn into_sorted(self) -> Vec<(CompactString, u64)> {
        let mut counts: Vec<(CompactString, u64)> = self.counts.into_iter().collect();
        counts.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        counts
    }
}

fn check_entry(entry: &str) -> Result<()> {
    if entry.is_empty() {
        return Err(HuffmanError::InvalidConfiguration(
            "corpus entries must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn count_entry(entry: &str, max_token_length: usize, counts: &mut AHashMap<CompactString, u64>) {
    if max_token_length == MAX_LENGTH_WHOLE_WORDS {
        *counts.entry(CompactString::new(entry)).or_insert(0) += 1;
        return;
    }

    // Byte offsets of every character boundary, including the end
    let bounds: Vec<usize> = entry
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(entry.len()))
        .collect();
    let chars = bounds.len() - 1;

    for window in (1..=max_token_length.min(chars)).rev() {
        for start in 0..=chars - window {
            let token = &entry[bounds[start]..bounds[start + window]];
            *counts.entry(CompactString::new(token)).or_insert(0) += 1;
        }
    }
}
