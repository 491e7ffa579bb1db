// src/numeric.rs

//! Arbitrary-precision helpers for the decimal / binary conversion path.
//!
//! A full grid encodes to 1802 bits, far beyond any native integer width,
//! so everything on this path goes through `num_bigint::BigUint`. Values
//! are non-negative and immutable; operations return new values.
//!
//! Multiplication, exact division, remainder, and equality come from
//! `BigUint`'s operator impls directly. This module adds the string
//! boundary: decimal parse/format with validation, and the MSB-first
//! binary bit-string conversions the codec is built on.

use crate::error::CodecError;
use num_bigint::BigUint;
use num_traits::Zero;

/// Parses a non-negative decimal string.
///
/// The driver-side sanitizer has already stripped formatting characters;
/// anything left that is not an ASCII digit rejects the whole string, as
/// does an empty string.
pub fn parse_decimal(input: &str) -> Result<BigUint, CodecError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::InvalidNumberFormat);
    }
    BigUint::parse_bytes(input.as_bytes(), 10).ok_or(CodecError::InvalidNumberFormat)
}

/// Formats a value as its decimal digit string.
pub fn to_decimal_string(value: &BigUint) -> String {
    value.to_str_radix(10)
}

/// Formats a value in binary, most significant bit first, with no leading
/// zeros. Zero yields `"0"`.
pub fn to_binary_string(value: &BigUint) -> String {
    value.to_str_radix(2)
}

/// Interprets a sequence of `'0'`/`'1'` characters, most significant bit
/// first. An empty or all-zero string yields zero. Characters other than
/// `'1'` count as zero bits; callers only ever pass strings they built.
pub fn from_binary_string(bits: &str) -> BigUint {
    let mut value = BigUint::zero();
    for c in bits.chars() {
        value <<= 1u8;
        if c == '1' {
            value += 1u8;
        }
    }
    value
}
