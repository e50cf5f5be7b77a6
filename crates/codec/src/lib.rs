//! Hufftable-codec - text <-> code conversion
//!
//! This crate applies a code table to text, integrating table construction,
//! the greedy encoder/decoder and base conversion into a single API.
//!
//! # Features
//!
//! - Simple builder pattern for codec configuration
//! - Longest-token-first encoding, prefix-bucket or code-length decoding
//! - Compact output in any alphabet of 2 to 256 symbols (default: 65-symbol
//!   URL-safe alphabet)
//! - Optional result cache owned by the codec
//! - Saving and loading tables as JSON
//!
//! # Example
//!
//! ```rust
//! use hufftable_codec::Codec;
//!
//! let codec = Codec::builder()
//!     .max_token_length(1)
//!     .build(&["aaabbcc"])?;
//!
//! let encoded = codec.encode("aaaaaaaaaabbcc", true)?;
//! let decoded = codec.decode(&encoded, true)?;
//! assert_eq!(decoded, "aaaaaaaaaabbcc");
//! # Ok::<(), hufftable_codec::HuffmanError>(())
//! ```

// Re-export core types
pub use hufftable_core::{CodeEntry, CodeTable, HuffmanError, Result, MAX_LENGTH_WHOLE_WORDS};
pub use hufftable_training::{build_table, TableBuilder, TableConfig};

// Codec API
pub mod codec;
pub use codec::{Codec, CodecBuilder, CodecConfig, DecodeStrategy};

// Numeral conversion
pub mod convert;
pub use convert::{convert_base, Alphabet};

// IO/Serialization
pub mod io;
pub use io::{SerializedTable, TableLoader, TableSaver};

// Utilities
pub mod utils;
pub use utils::CodecCache;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
