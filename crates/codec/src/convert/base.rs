//! Arbitrary-precision numeral conversion between alphabets.
//!
//! The input is read as a big-endian numeral in the base of its alphabet and
//! rewritten in the base of the output alphabet. Each leading zero-valued
//! symbol of the input maps to one leading zero-valued symbol of the output,
//! so converting back restores the input exactly. Inputs without leading
//! zeros convert to the plain numeral.

use super::alphabet::Alphabet;
use hufftable_core::{HuffmanError, Result};
use num_bigint::BigUint;

/// Convert `input` from the numeral system of `from` to that of `to`.
///
/// # Errors
/// `InvalidSymbol` if a character of `input` is not in `from`.
pub fn convert_base(input: &str, from: &Alphabet, to: &Alphabet) -> Result<String> {
    if input.is_empty() {
        return Ok(String::new());
    }

    let mut digits = Vec::with_capacity(input.len());
    for (position, symbol) in input.chars().enumerate() {
        let digit = from
            .digit_of(symbol)
            .ok_or(HuffmanError::InvalidSymbol { symbol, position })?;
        digits.push(digit);
    }

    let leading_zeros = digits.iter().take_while(|&&d| d == 0).count();
    let mut output: String = std::iter::repeat(to.zero()).take(leading_zeros).collect();

    let significant = &digits[leading_zeros..];
    if significant.is_empty() {
        return Ok(output);
    }

    let value = BigUint::from_radix_be(significant, from.radix()).ok_or_else(|| {
        HuffmanError::InvalidConfiguration(format!("unsupported radix {}", from.radix()))
    })?;

    output.extend(value.to_radix_be(to.radix()).into_iter().map(|d| to.symbol(d)));
    Ok(output)
}
