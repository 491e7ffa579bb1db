// src/error.rs

//! User-facing error kinds produced by the import path.
//!
//! These are the only errors the core reports to the user; the display text
//! of each variant is what the error banner shows. Out-of-range cell indices
//! are a contract violation, not an error value, and panic in `grid`.

use thiserror::Error;

/// Errors surfaced when decoding a decimal string onto the grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input was empty or contained something other than ASCII digits
    /// after driver-side sanitization.
    #[error("not a valid non-negative decimal number")]
    InvalidNumberFormat,

    /// The parsed value is not a multiple of the configured scale factor.
    #[error("{value} is not divisible by {divisor}")]
    NotDivisible { value: String, divisor: u32 },

    /// The scaled value has more bits than the grid has cells.
    #[error("number needs {bits} bits but the grid holds {capacity}")]
    NumberTooLarge { bits: usize, capacity: usize },
}
