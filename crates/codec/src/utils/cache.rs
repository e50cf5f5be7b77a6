//! Memoization of encode/decode results.
//!
//! A `CodecCache` is an explicit object handed to a codec at build time. It
//! maps `(operation, input, compact)` to the produced output. Every write for
//! a key produces the same value, so re-inserting an existing key is harmless.

use crate::Result;
use std::collections::{HashMap, VecDeque};
use tracing::trace;

/// Which codec operation produced a cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Encode,
    Decode,
}

/// Cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub operation: Operation,
    pub input: String,
    pub compact: bool,
}

impl CacheKey {
    pub fn new(operation: Operation, input: &str, compact: bool) -> Self {
        Self {
            operation,
            input: input.to_string(),
            compact,
        }
    }
}

/// LRU cache for codec results.
///
/// Uses a HashMap plus a recency queue with a fixed capacity.
/// When the cache exceeds capacity, the least recently used entry is evicted.
pub struct CodecCache {
    /// The cache storing key -> output
    cache: HashMap<CacheKey, String>,
    /// Maximum number of entries in the cache
    capacity: usize,
    /// Least recently used at the front
    recency: VecDeque<CacheKey>,
    hits: u64,
    misses: u64,
}

impl CodecCache {
    /// Create a new cache with the given capacity.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries to store
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(capacity),
            capacity,
            recency: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Create a new cache with default capacity (1000).
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    /// Look up a cached output, marking it most recently used.
    pub fn get(&mut self, key: &CacheKey) -> Option<String> {
        match self.cache.get(key).cloned() {
            Some(value) => {
                self.hits += 1;
                self.touch(key);
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Get a cached output or compute it with the provided function.
    ///
    /// Errors from `compute` are returned and nothing is cached.
    pub fn get_or_insert_with<F>(&mut self, key: CacheKey, compute: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if let Some(cached) = self.get(&key) {
            return Ok(cached);
        }

        let value = compute()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Insert a value into the cache.
    pub fn insert(&mut self, key: CacheKey, value: String) {
        if self.capacity == 0 {
            return;
        }

        if self.cache.contains_key(&key) {
            self.touch(&key);
            self.cache.insert(key, value);
            return;
        }

        // If at capacity, evict least recently used entry
        if self.recency.len() >= self.capacity {
            if let Some(oldest) = self.recency.pop_front() {
                trace!(
                    operation = ?oldest.operation,
                    input_len = oldest.input.len(),
                    "evicting cached codec result"
                );
                self.cache.remove(&oldest);
            }
        }

        self.recency.push_back(key.clone());
        self.cache.insert(key, value);
    }

    fn touch(&mut self, key: &CacheKey) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            if let Some(k) = self.recency.remove(pos) {
                self.recency.push_back(k);
            }
        }
    }

    /// Clear all entries from the cache.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.recency.clear();
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get the cache capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Resize the cache.
    ///
    /// If the new capacity is smaller than the current size,
    /// least recently used entries will be evicted.
    pub fn resize(&mut self, new_capacity: usize) {
        self.capacity = new_capacity;

        while self.recency.len() > new_capacity {
            if let Some(oldest) = self.recency.pop_front() {
                self.cache.remove(&oldest);
            }
        }
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        CacheStats {
            entries: self.cache.len(),
            capacity: self.capacity,
            hit_rate: (lookups > 0).then(|| self.hits as f64 / lookups as f64),
        }
    }
}

impl Default for CodecCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Maximum capacity
    pub capacity: usize,
    /// Cache hit rate (None before the first lookup)
    pub hit_rate: Option<f64>,
}
