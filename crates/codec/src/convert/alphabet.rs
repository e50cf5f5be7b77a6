//! Ordered symbol sets for numeral conversion.

use ahash::AHashMap;
use hufftable_core::{HuffmanError, Result};

/// Binary digits, the alphabet of raw encoder output.
pub const BINARY: &str = "01";
/// Decimal digits.
pub const BASE10: &str = "0123456789";
/// Upper-case hexadecimal digits.
pub const BASE16: &str = "0123456789ABCDEF";
/// Lower-case hexadecimal digits.
pub const BASE16_LOWER: &str = "0123456789abcdef";
/// Digits and upper-case letters.
pub const BASE36: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Digits and lower-case letters.
pub const BASE36_LOWER: &str = "0123456789abcdefghijklmnopqrstuvwxyz";
/// Digits and both letter cases.
pub const BASE62: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
/// Largest URL-safe alphabet. Default compact alphabet.
pub const BASE65: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_~";

/// Largest supported alphabet; digits are stored as `u8`.
pub const MAX_SYMBOLS: usize = 256;

/// An ordered sequence of distinct symbols. The symbol at position `i`
/// represents digit value `i`.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<char>,
    digits: AHashMap<char, u8>,
}

impl Alphabet {
    /// Create an alphabet from its symbols.
    ///
    /// # Errors
    /// `InvalidConfiguration` unless there are 2..=256 distinct symbols.
    pub fn new(symbols: &str) -> Result<Self> {
        let count = symbols.chars().count();
        if !(2..=MAX_SYMBOLS).contains(&count) {
            return Err(HuffmanError::InvalidConfiguration(format!(
                "alphabet needs between 2 and {} symbols, got {}",
                MAX_SYMBOLS, count
            )));
        }

        let alphabet = Self::from_valid(symbols);
        if alphabet.digits.len() != count {
            return Err(HuffmanError::InvalidConfiguration(format!(
                "alphabet \"{}\" contains repeated symbols",
                symbols
            )));
        }

        Ok(alphabet)
    }

    // Callers guarantee 2..=256 distinct symbols.
    fn from_valid(symbols: &str) -> Self {
        let symbols: Vec<char> = symbols.chars().collect();
        let digits = symbols
            .iter()
            .enumerate()
            .map(|(digit, &symbol)| (symbol, digit as u8))
            .collect();
        Self { symbols, digits }
    }

    /// The binary alphabet `01`.
    pub fn binary() -> Self {
        Self::from_valid(BINARY)
    }

    /// The 65-symbol URL-safe alphabet.
    pub fn base65() -> Self {
        Self::from_valid(BASE65)
    }

    /// Number of symbols, i.e. the numeral base.
    #[inline]
    pub fn radix(&self) -> u32 {
        self.symbols.len() as u32
    }

    /// Number of symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; alphabets hold at least two symbols.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Digit value of a symbol.
    #[inline]
    pub fn digit_of(&self, symbol: char) -> Option<u8> {
        self.digits.get(&symbol).copied()
    }

    /// Symbol for a digit value. `digit` must be below [`Alphabet::radix`].
    #[inline]
    pub fn symbol(&self, digit: u8) -> char {
        self.symbols[digit as usize]
    }

    /// The zero-valued symbol.
    #[inline]
    pub fn zero(&self) -> char {
        self.symbols[0]
    }

    /// The symbols as a string.
    pub fn as_string(&self) -> String {
        self.symbols.iter().collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::base65()
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

impl std::str::FromStr for Alphabet {
    type Err = HuffmanError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}
