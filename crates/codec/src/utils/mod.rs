//! Utility modules for the codec.
//!
//! This module contains the encode/decode result cache.

pub mod cache;

pub use cache::{CacheKey, CacheStats, CodecCache, Operation};
