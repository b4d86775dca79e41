//! Byte-aligned runs that a fixed-width field is split into at compile time.

use crate::bits::mask;

/// A maximal run of a field's bits that lives inside a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Byte of the buffer this run touches.
    pub byte_index: usize,
    /// Position of the run's lowest bit inside that byte (0 = LSB).
    pub bit_pos: u8,
    /// Number of bits in the run (1..=8).
    pub len_bits: u8,
    /// Distance from the field value's LSB to the run's LSB.
    pub shift: u8,
}

impl Chunk {
    pub fn new(byte_index: usize, bit_pos: u8, len_bits: u8, shift: u8) -> Self {
        Chunk {
            byte_index,
            bit_pos,
            len_bits,
            shift,
        }
    }

    /// Mask covering `len_bits` low bits.
    #[inline]
    pub fn mask(&self) -> u8 {
        mask(self.len_bits as usize) as u8
    }

    /// Merges this run's slice of `value` into `data`, leaving other bits of the byte intact.
    ///
    /// `data` must be at least `byte_index + 1` bytes long.
    #[inline]
    pub fn write(&self, data: &mut [u8], value: u64) {
        let m = self.mask();
        let part = (value >> self.shift) as u8 & m;
        let byte = &mut data[self.byte_index];
        *byte = (*byte & !(m << self.bit_pos)) | (part << self.bit_pos);
    }

    /// Extracts this run's bits, already shifted into place within the field value.
    #[inline]
    pub fn read(&self, data: &[u8]) -> u64 {
        (((data[self.byte_index] >> self.bit_pos) & self.mask()) as u64) << self.shift
    }
}

/// Splits the span `[bit_offset, bit_offset + len_bits)` into byte-aligned runs.
///
/// The first run may cover a partial byte, middle runs cover whole bytes and the
/// last run holds the remainder. Runs are ordered by ascending bit offset and the
/// first run carries the most-significant bits of the value.
pub fn split(bit_offset: usize, len_bits: usize) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(len_bits / 8 + 2);
    let mut pos = bit_offset;
    let mut remaining = len_bits;

    while remaining > 0 {
        let bit_pos = pos % 8;
        let run = (8 - bit_pos).min(remaining);
        remaining -= run;

        chunks.push(Chunk::new(pos / 8, bit_pos as u8, run as u8, remaining as u8));

        pos += run;
    }

    chunks
}
