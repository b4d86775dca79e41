//! Low-level bit read and write utilities for byte slices.
//!
//! Bits are addressed LSB-first inside each byte: bit offset 0 is the low bit of
//! the first byte. A value spanning several bytes is stored with its
//! most-significant part at the lowest bit offset, so reads accumulate
//! high-order-first.

use crate::errors::RangeError;

/// Returns a mask with the low `width` bits set (`width` up to 64).
#[inline]
pub fn mask(width: usize) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

fn check_span(data_len: usize, bit_offset: usize, width: usize) -> Result<(), RangeError> {
    if width > 64 {
        return Err(RangeError::TooManyBits(width));
    }

    if bit_offset
        .checked_add(width)
        .map_or(true, |end| end > data_len * 8)
    {
        return Err(RangeError::OutOfBounds {
            bit_offset,
            width,
            capacity: data_len,
        });
    }

    Ok(())
}

/// Writes the low `width` bits of `value` starting at `bit_offset`.
///
/// Every bit outside `[bit_offset, bit_offset + width)` is preserved, including
/// the untouched bits of partially covered boundary bytes. Nothing is written
/// when the span does not fit.
pub fn write_bits(
    data: &mut [u8],
    bit_offset: usize,
    value: u64,
    width: usize,
) -> Result<(), RangeError> {
    check_span(data.len(), bit_offset, width)?;

    let value = value & mask(width);
    let mut pos = bit_offset;
    let mut remaining = width;

    while remaining > 0 {
        let byte_index = pos / 8;
        let bit_pos = pos % 8;
        let run = (8 - bit_pos).min(remaining);
        let run_mask = mask(run) as u8;
        let part = (value >> (remaining - run)) as u8 & run_mask;

        data[byte_index] = (data[byte_index] & !(run_mask << bit_pos)) | (part << bit_pos);

        remaining -= run;
        pos += run;
    }

    Ok(())
}

/// Reads `width` bits starting at `bit_offset` as an unsigned value (max 64 bits).
pub fn read_bits(data: &[u8], bit_offset: usize, width: usize) -> Result<u64, RangeError> {
    check_span(data.len(), bit_offset, width)?;

    let mut value = 0u64;
    let mut pos = bit_offset;
    let mut remaining = width;

    while remaining > 0 {
        let bit_pos = pos % 8;
        let run = (8 - bit_pos).min(remaining);
        let part = (data[pos / 8] >> bit_pos) as u64 & mask(run);

        value = (value << run) | part;

        remaining -= run;
        pos += run;
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask(0), 0);
        assert_eq!(mask(3), 0b111);
        assert_eq!(mask(64), u64::MAX);
    }

    #[test]
    fn test_write_bits_single_byte() {
        let mut data = [0u8; 1];
        write_bits(&mut data, 0, 0b101, 3).unwrap();
        assert_eq!(data, [0b0000_0101]);

        write_bits(&mut data, 3, 0b11, 2).unwrap();
        assert_eq!(data, [0b0001_1101]);
    }

    #[test]
    fn test_write_bits_crosses_boundary() {
        let mut data = [0u8; 2];
        // 6 bits at offset 3: high 5 bits land in byte 0, low bit in byte 1.
        write_bits(&mut data, 3, 0b110101, 6).unwrap();
        assert_eq!(data, [0b1101_0000, 0b0000_0001]);
        assert_eq!(read_bits(&data, 3, 6).unwrap(), 0b110101);
    }

    #[test]
    fn test_write_bits_preserves_neighbours() {
        let mut data = [0xFFu8; 3];
        write_bits(&mut data, 5, 0, 12).unwrap();
        assert_eq!(data, [0b0001_1111, 0b0000_0000, 0b1111_1110]);
    }

    #[test]
    fn test_read_bits_at() {
        let data = [0b11111111];
        assert_eq!(read_bits(&data, 0, 8).unwrap(), 0b11111111);
        assert_eq!(read_bits(&data, 8, 0).unwrap(), 0);
    }

    #[test]
    fn test_read_bits_out_of_bounds() {
        let data = [0b11111111];
        assert_eq!(
            read_bits(&data, 0, 9).unwrap_err(),
            RangeError::OutOfBounds {
                bit_offset: 0,
                width: 9,
                capacity: 1
            }
        );
    }

    #[test]
    fn test_read_bits_more_than_64() {
        let data = [0u8; 16];
        assert_eq!(
            read_bits(&data, 0, 65).unwrap_err(),
            RangeError::TooManyBits(65)
        );
    }

    #[test]
    fn test_write_bits_out_of_bounds_leaves_buffer() {
        let mut data = [0xAAu8; 2];
        assert!(write_bits(&mut data, 10, 0, 7).is_err());
        assert_eq!(data, [0xAA, 0xAA]);
    }

    #[test]
    fn test_full_width_value() {
        let mut data = [0u8; 9];
        write_bits(&mut data, 4, u64::MAX - 1, 64).unwrap();
        assert_eq!(read_bits(&data, 4, 64).unwrap(), u64::MAX - 1);
        assert_eq!(data[0] & 0x0F, 0);
        assert_eq!(data[8] & 0xF0, 0);
    }

    proptest! {
        #[test]
        fn prop_write_then_read(
            width in 1usize..=64,
            offset in 0usize..40,
            value in any::<u64>(),
            fill in any::<u8>(),
        ) {
            let mut data = vec![fill; 14];
            let before = data.clone();
            write_bits(&mut data, offset, value, width).unwrap();
            prop_assert_eq!(read_bits(&data, offset, width).unwrap(), value & mask(width));

            for bit in (0..data.len() * 8).filter(|b| *b < offset || *b >= offset + width) {
                prop_assert_eq!(
                    (data[bit / 8] >> (bit % 8)) & 1,
                    (before[bit / 8] >> (bit % 8)) & 1
                );
            }
        }
    }
}
