//! Numeric transforms between application values and the unsigned integers the
//! bit engine stores.
//!
//! ## Transform order
//!
//! Encoding applies, in order:
//! 1. Fixed-point quantization (`round(raw * precision)`)
//! 2. Integer packing (unsigned truncation, two's-complement bias, or zigzag)
//!
//! Decoding runs the inverse integer transform first and divides by the
//! precision last.

use crate::{bits::mask, errors::RangeError};

/// Longest varint a `u64` can produce.
pub const MAX_VARINT_LEN: usize = 10;

/// What to do with a value that does not fit its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Keep only the low bits of the value. Out-of-range inputs decode to a
    /// different number without any signal.
    #[default]
    Wrap,
    /// Refuse to encode out-of-range inputs.
    Reject,
}

/// A value fell outside the range its field can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

/// Scales `raw` to a fixed-point integer, rounding half away from zero.
///
/// NaN maps to 0 and infinities saturate.
#[inline]
pub fn quantize(raw: f64, precision: f64) -> i64 {
    (raw * precision).round() as i64
}

/// Like [quantize] but fails instead of saturating.
pub fn quantize_checked(raw: f64, precision: f64) -> Result<i64, Overflow> {
    let scaled = (raw * precision).round();

    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if scaled.is_finite() && scaled >= i64::MIN as f64 && scaled < i64::MAX as f64 {
        Ok(scaled as i64)
    } else {
        Err(Overflow)
    }
}

#[inline]
pub fn dequantize(stored: i64, precision: f64) -> f64 {
    stored as f64 / precision
}

/// Keeps the low `bits` bits of `scaled`.
#[inline]
pub fn pack_unsigned(scaled: i64, bits: u32, policy: OverflowPolicy) -> Result<u64, Overflow> {
    let m = mask(bits as usize);

    if policy == OverflowPolicy::Reject && (scaled < 0 || scaled as u64 > m) {
        return Err(Overflow);
    }

    Ok(scaled as u64 & m)
}

/// Biases a negative `scaled` by `2^bits` and keeps the low `bits` bits.
#[inline]
pub fn pack_signed(scaled: i64, bits: u32, policy: OverflowPolicy) -> Result<u64, Overflow> {
    let half = 1i64 << (bits - 1);

    if policy == OverflowPolicy::Reject && (scaled < -half || scaled >= half) {
        return Err(Overflow);
    }

    let biased = if scaled < 0 {
        scaled.wrapping_add(1i64 << bits)
    } else {
        scaled
    };

    Ok(biased as u64 & mask(bits as usize))
}

/// Restores the sign of a `bits`-wide two's-complement value.
#[inline]
pub fn unpack_signed(stored: u64, bits: u32) -> i64 {
    if stored >= 1u64 << (bits - 1) {
        stored as i64 - (1i64 << bits)
    } else {
        stored as i64
    }
}

/// Maps signed to unsigned so that small magnitudes stay small: 0, -1, 1, -2 → 0, 1, 2, 3.
#[inline]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Number of 7-bit groups needed to hold `value`.
#[inline]
pub fn varint_len(value: u64) -> usize {
    let significant = 64 - value.leading_zeros() as usize;
    significant.div_ceil(7).max(1)
}

/// Writes `value` as little-endian 7-bit groups at `pos`. Returns the number of bytes written.
pub fn write_varint(data: &mut [u8], pos: usize, mut value: u64) -> Result<usize, RangeError> {
    let len = varint_len(value);

    if pos.checked_add(len).map_or(true, |end| end > data.len()) {
        return Err(RangeError::OutOfBounds {
            bit_offset: pos.saturating_mul(8),
            width: len * 8,
            capacity: data.len(),
        });
    }

    for byte in &mut data[pos..pos + len] {
        let group = (value & 0x7F) as u8;
        value >>= 7;
        *byte = if value != 0 { group | 0x80 } else { group };
    }

    Ok(len)
}

/// Reads one varint at `pos`. Returns the value and the number of bytes consumed.
pub fn read_varint(data: &[u8], pos: usize) -> Result<(u64, usize), RangeError> {
    let mut value = 0u64;
    let mut shift = 0u32;
    let mut cursor = pos;

    loop {
        let byte = *data
            .get(cursor)
            .ok_or(RangeError::UnexpectedEnd { pos: cursor })?;
        cursor += 1;

        // The tenth group only has room for bit 63.
        if shift == 63 && byte & 0x7E != 0 {
            return Err(RangeError::VarintOverflow { pos });
        }

        value |= ((byte & 0x7F) as u64) << shift;

        if byte & 0x80 == 0 {
            return Ok((value, cursor - pos));
        }

        shift += 7;
        if shift >= 64 {
            return Err(RangeError::VarintOverflow { pos });
        }
    }
}
