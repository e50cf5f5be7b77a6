//! Error types for the hufftable library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type shared by every hufftable crate.
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// Bad construction parameters (empty corpus, empty token, broken alphabet,
    /// persisted table that is not prefix-free, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Encode-time: the text contains a token absent from the table.
    /// Carries the unmatched suffix.
    #[error("Unknown token for \"{0}\"")]
    UnknownToken(String),

    /// Decode-time: the bit-string does not decompose into known codes.
    /// Carries the unmatched suffix.
    #[error("Unknown code for \"{0}\"")]
    UnknownCode(String),

    /// Base conversion saw a character outside the declared alphabet
    #[error("Invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// Error loading a persisted table
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a table
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for hufftable operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;
