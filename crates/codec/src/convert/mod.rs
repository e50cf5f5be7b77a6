//! Numeral conversion used to fold bit-strings into dense alphabets.

pub mod alphabet;
pub mod base;

pub use alphabet::{
    Alphabet, BASE10, BASE16, BASE16_LOWER, BASE36, BASE36_LOWER, BASE62, BASE65, BINARY,
};
pub use base::convert_base;
