use crate::{
    chunk::{self, Chunk},
    errors::SchemaError,
    field::{Field, FieldKind},
    transform::{self, Overflow, OverflowPolicy},
};

/// A validated field with its position in the schema and its byte-aligned runs.
#[derive(Debug, Clone)]
pub struct CompiledField {
    /// Stable slot of this field in a [crate::record::Record].
    pub index: usize,
    pub name: String,
    pub kind: FieldKind,
    /// Width in bits; 0 for varint fields.
    pub bits: u32,
    pub precision: f64,
    /// First bit of the field in the buffer; only meaningful for fixed-width fields.
    pub bit_offset: usize,
    /// Runs ordered by ascending bit offset; empty for varint fields.
    pub chunks: Vec<Chunk>,
}

impl CompiledField {
    /// Validates `field` and lays it out at `bit_offset`.
    pub fn compile(field: &Field, index: usize, bit_offset: usize) -> Result<Self, SchemaError> {
        if field.name.is_empty() {
            return Err(SchemaError::InvalidFieldName);
        }

        if !field.precision.is_finite() || field.precision <= 0.0 {
            return Err(SchemaError::InvalidPrecision {
                name: field.name.clone(),
            });
        }

        let bits = match field.kind {
            FieldKind::FixedUint | FieldKind::FixedInt => {
                let bits = field
                    .bits
                    .ok_or_else(|| SchemaError::MissingBitWidth(field.name.clone()))?;

                if bits == 0 || bits > 32 {
                    return Err(SchemaError::InvalidBitWidth {
                        name: field.name.clone(),
                        bits,
                    });
                }

                bits
            }
            FieldKind::Varint => 0,
        };

        let chunks = if bits > 0 {
            chunk::split(bit_offset, bits as usize)
        } else {
            Vec::new()
        };

        log::trace!(
            "field `{}` at bit {} split into {} chunk(s)",
            field.name,
            bit_offset,
            chunks.len()
        );

        Ok(CompiledField {
            index,
            name: field.name.clone(),
            kind: field.kind,
            bits,
            precision: field.precision,
            bit_offset,
            chunks,
        })
    }

    /// Turns an application value into the unsigned integer stored on the wire.
    ///
    /// Fixed-width fields yield a value of at most `bits` bits; varint fields
    /// yield the zigzag mapping of the scaled value.
    #[inline]
    pub fn to_stored(&self, raw: f64, policy: OverflowPolicy) -> Result<u64, Overflow> {
        let scaled = match policy {
            OverflowPolicy::Wrap => transform::quantize(raw, self.precision),
            OverflowPolicy::Reject => transform::quantize_checked(raw, self.precision)?,
        };

        match self.kind {
            FieldKind::FixedUint => transform::pack_unsigned(scaled, self.bits, policy),
            FieldKind::FixedInt => transform::pack_signed(scaled, self.bits, policy),
            FieldKind::Varint => Ok(transform::zigzag_encode(scaled)),
        }
    }

    /// Inverse of [CompiledField::to_stored].
    #[inline]
    pub fn from_stored(&self, stored: u64) -> f64 {
        let value = match self.kind {
            FieldKind::FixedUint => stored as i64,
            FieldKind::FixedInt => transform::unpack_signed(stored, self.bits),
            FieldKind::Varint => transform::zigzag_decode(stored),
        };

        transform::dequantize(value, self.precision)
    }

    /// Writes a stored value through the chunk list. `data` must cover the field.
    #[inline]
    pub fn write(&self, data: &mut [u8], stored: u64) {
        for chunk in &self.chunks {
            chunk.write(data, stored);
        }
    }

    /// Reads the stored value through the chunk list. `data` must cover the field.
    #[inline]
    pub fn read(&self, data: &[u8]) -> u64 {
        self.chunks.iter().fold(0, |acc, chunk| acc | chunk.read(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_fixed_field() {
        let field = CompiledField::compile(&Field::uint("b", 6), 1, 3).unwrap();
        assert_eq!(field.index, 1);
        assert_eq!(field.bits, 6);
        assert_eq!(field.bit_offset, 3);
        assert_eq!(
            field.chunks,
            vec![Chunk::new(0, 3, 5, 1), Chunk::new(1, 0, 1, 0)]
        );
    }

    #[test]
    fn test_compile_varint_ignores_width() {
        let mut field = Field::varint("v");
        field.bits = Some(40);
        let compiled = CompiledField::compile(&field, 0, 0).unwrap();
        assert_eq!(compiled.bits, 0);
        assert!(compiled.chunks.is_empty());
    }

    #[test]
    fn test_compile_rejects_width() {
        assert_eq!(
            CompiledField::compile(&Field::uint("a", 0), 0, 0).unwrap_err(),
            SchemaError::InvalidBitWidth {
                name: "a".to_string(),
                bits: 0
            }
        );
        assert_eq!(
            CompiledField::compile(&Field::int("a", 33), 0, 0).unwrap_err(),
            SchemaError::InvalidBitWidth {
                name: "a".to_string(),
                bits: 33
            }
        );
        assert_eq!(
            CompiledField::compile(&Field::new("a", FieldKind::FixedInt, None), 0, 0).unwrap_err(),
            SchemaError::MissingBitWidth("a".to_string())
        );
    }

    #[test]
    fn test_compile_rejects_precision() {
        for precision in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                CompiledField::compile(&Field::uint("p", 8).with_precision(precision), 0, 0)
                    .unwrap_err(),
                SchemaError::InvalidPrecision {
                    name: "p".to_string()
                }
            );
        }
    }

    #[test]
    fn test_compile_rejects_empty_name() {
        assert_eq!(
            CompiledField::compile(&Field::uint("", 8), 0, 0).unwrap_err(),
            SchemaError::InvalidFieldName
        );
    }

    #[test]
    fn test_stored_roundtrip() {
        let field = CompiledField::compile(&Field::int("x", 32).with_precision(10000.0), 0, 0)
            .unwrap();
        let stored = field.to_stored(160.2216, OverflowPolicy::Wrap).unwrap();
        assert_eq!(stored, 1602216);
        assert_eq!(field.from_stored(stored), 160.2216);

        let stored = field.to_stored(-160.2216, OverflowPolicy::Wrap).unwrap();
        assert_eq!(stored, (1u64 << 32) - 1602216);
        assert_eq!(field.from_stored(stored), -160.2216);
    }

    #[test]
    fn test_write_read_through_chunks() {
        let field = CompiledField::compile(&Field::uint("c", 7), 2, 9).unwrap();
        let mut data = [0xFFu8; 2];
        field.write(&mut data, 0b1010101);
        assert_eq!(field.read(&data), 0b1010101);
        assert_eq!(data[1] & 0x01, 0x01);
    }
}
