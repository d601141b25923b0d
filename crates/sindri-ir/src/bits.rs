//! Bit-vector conversion helpers.
//!
//! Everything in Sindri is least-significant-bit-first: index 0 of a register
//! or bit list is the low bit. These helpers are the single place that
//! convention is pinned down.

use crate::error::{IrError, IrResult};

/// Number of bits needed to represent an unsigned value (at least 1).
pub fn uint_len(value: u64) -> u32 {
    if value == 0 {
        1
    } else {
        64 - value.leading_zeros()
    }
}

/// Convert an unsigned integer to a bit list, least-significant first.
///
/// Fails with [`IrError::ValueTooWide`] if the value does not fit.
pub fn uint_to_bits(value: u64, width: u32) -> IrResult<Vec<bool>> {
    if uint_len(value) > width {
        return Err(IrError::ValueTooWide { value, width });
    }
    Ok((0..width).map(|bit| (value >> bit) & 1 == 1).collect())
}

/// Convert a least-significant-first bit list back to an unsigned integer.
pub fn bits_to_uint(bits: &[bool]) -> u64 {
    bits.iter()
        .enumerate()
        .fold(0, |acc, (i, &b)| acc | (u64::from(b) << i))
}
