// src/codec.rs

//! Translates between the grid's cell states and the externally displayed
//! decimal number.
//!
//! The grid flattens to a binary string by walking columns from highest to
//! lowest and, within each column, rows from highest to lowest; read left
//! to right that string is the raw value, most significant bit first. The
//! displayed number is the raw value times the scale factor, so imports
//! must be divisible by it. Decoding walks the scaled value's bits from the
//! least significant end: bit `i` lands on cell `(i / rows, i % rows)`,
//! the exact inverse of the flattening.

use crate::config::EncodingConfig;
use crate::error::CodecError;
use crate::grid::GridState;
use crate::numeric;
use log::debug;
use num_bigint::BigUint;
use num_traits::Zero;

/// Encodes and decodes one grid layout under a fixed scale factor.
#[derive(Debug, Clone, Copy)]
pub struct GridCodec {
    scale_factor: u32,
}

impl GridCodec {
    pub fn new(encoding: &EncodingConfig) -> Self {
        assert!(encoding.scale_factor > 0, "scale factor must be non-zero");
        GridCodec {
            scale_factor: encoding.scale_factor,
        }
    }

    /// The scaled integer encoding of the whole grid.
    ///
    /// Always divisible by the scale factor by construction, so the result
    /// round-trips through `decode` unconditionally.
    pub fn encode(&self, grid: &GridState) -> BigUint {
        let (columns, rows) = grid.dimensions();
        let mut bits = String::with_capacity(columns * rows);
        for column in (0..columns).rev() {
            for row in (0..rows).rev() {
                bits.push(if grid.is_active(column, row) { '1' } else { '0' });
            }
        }
        numeric::from_binary_string(&bits) * self.scale_factor
    }

    /// Validates a decimal string and replots it onto the grid.
    ///
    /// The grid is untouched unless the input passes the format check, the
    /// divisibility check, and the capacity check.
    pub fn decode(&self, input: &str, grid: &mut GridState) -> Result<(), CodecError> {
        let value = numeric::parse_decimal(input)?;
        let divisor = BigUint::from(self.scale_factor);
        if !(&value % &divisor).is_zero() {
            return Err(CodecError::NotDivisible {
                value: numeric::to_decimal_string(&value),
                divisor: self.scale_factor,
            });
        }
        let scaled = &value / &divisor;
        let bits = numeric::to_binary_string(&scaled);

        let (columns, rows) = grid.dimensions();
        let capacity = columns * rows;
        if bits.len() > capacity {
            return Err(CodecError::NumberTooLarge {
                bits: bits.len(),
                capacity,
            });
        }
        debug!("plotting {} bits onto {}x{} grid", bits.len(), columns, rows);

        grid.clear();
        for (i, digit) in bits.chars().rev().enumerate() {
            if digit == '1' {
                grid.activate(i / rows, i % rows);
            }
        }
        Ok(())
    }
}
