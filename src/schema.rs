//! Schema: compiled, immutable set of fields used to encode records into bytes and back.

use std::collections::{BTreeMap, HashMap};

use crate::{
    compiled::CompiledField,
    errors::{EncodeError, RangeError, RecordError, SchemaError},
    field::Field,
    record::Record,
    transform::{self, MAX_VARINT_LEN, OverflowPolicy},
};

/// How a schema lays its fields out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Fixed-width fields packed back to back starting at bit 0.
    BitPacked { total_bits: usize },
    /// One zigzag varint per field, in declaration order.
    Varint,
}

/// A compiled schema. Use [Schema::compile] to build from [Field]s, then
/// [Schema::encode_into] / [Schema::decode_into] or a [crate::codec::Codec].
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<CompiledField>,
    layout: Layout,
    by_name: HashMap<String, usize>,
}

impl Schema {
    /// Compiles `fields` in declaration order. Fails if any field is invalid,
    /// names repeat, or fixed-width and varint fields are mixed.
    pub fn compile(fields: &[Field]) -> Result<Self, SchemaError> {
        let mut compiled_fields: Vec<CompiledField> = Vec::with_capacity(fields.len());
        let mut by_name = HashMap::with_capacity(fields.len());
        let mut bit_offset = 0;

        for (index, field) in fields.iter().enumerate() {
            let compiled_field = CompiledField::compile(field, index, bit_offset)?;

            if by_name.insert(field.name.clone(), index).is_some() {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }

            bit_offset += compiled_field.bits as usize;
            compiled_fields.push(compiled_field);
        }

        let varints = compiled_fields
            .iter()
            .filter(|f| !f.kind.is_fixed())
            .count();

        let layout = match varints {
            0 => Layout::BitPacked {
                total_bits: bit_offset,
            },
            n if n == compiled_fields.len() => Layout::Varint,
            _ => return Err(SchemaError::MixedLayout),
        };

        let schema = Self {
            fields: compiled_fields,
            layout,
            by_name,
        };

        log::debug!(
            "compiled schema: {} field(s), {:?}, up to {} byte(s)",
            schema.len(),
            schema.layout,
            schema.max_encoded_len()
        );

        Ok(schema)
    }

    /// Compiled fields in definition order.
    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sum of fixed field widths; 0 for varint schemas.
    pub fn total_bits(&self) -> usize {
        match self.layout {
            Layout::BitPacked { total_bits } => total_bits,
            Layout::Varint => 0,
        }
    }

    /// Exact encoded size of a bit-packed record, `ceil(total_bits / 8)`.
    pub fn buffer_size(&self) -> usize {
        self.total_bits().div_ceil(8)
    }

    /// Largest number of bytes any record can encode to.
    pub fn max_encoded_len(&self) -> usize {
        match self.layout {
            Layout::BitPacked { .. } => self.buffer_size(),
            Layout::Varint => self.fields.len() * MAX_VARINT_LEN,
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.index_of(name).map(|index| &self.fields[index])
    }

    /// A record with every field set to 0.
    pub fn record(&self) -> Record {
        Record::zeroed(self.fields.len())
    }

    /// Builds a record from `(name, value)` pairs. Fields not mentioned are 0.
    pub fn record_from<I, K>(&self, pairs: I) -> Result<Record, RecordError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut record = self.record();

        for (name, value) in pairs {
            let name = name.as_ref();
            let index = self
                .index_of(name)
                .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;
            record[index] = value;
        }

        Ok(record)
    }

    /// Returns a map of field names to the values of `record`.
    pub fn to_map(&self, record: &Record) -> BTreeMap<String, f64> {
        self.fields
            .iter()
            .filter_map(|field| record.get(field.index).map(|v| (field.name.clone(), v)))
            .collect()
    }

    /// Encodes `record` into the start of `out`. Returns the number of bytes written.
    ///
    /// Bit-packed schemas always write [Schema::buffer_size] bytes; varint
    /// schemas write a data-dependent length of at most [Schema::max_encoded_len].
    pub fn encode_into(
        &self,
        record: &Record,
        out: &mut [u8],
        policy: OverflowPolicy,
    ) -> Result<usize, EncodeError> {
        if record.len() != self.fields.len() {
            return Err(EncodeError::RecordLength {
                expected: self.fields.len(),
                actual: record.len(),
            });
        }

        match self.layout {
            Layout::BitPacked { .. } => {
                let size = self.buffer_size();
                if out.len() < size {
                    return Err(RangeError::BufferTooShort {
                        required: size,
                        actual: out.len(),
                    }
                    .into());
                }

                let out = &mut out[..size];
                out.fill(0);

                for field in &self.fields {
                    let stored = self.stored(field, record[field.index], policy)?;
                    field.write(out, stored);
                }

                Ok(size)
            }
            Layout::Varint => {
                let mut cursor = 0;

                for field in &self.fields {
                    let stored = self.stored(field, record[field.index], policy)?;
                    cursor += transform::write_varint(out, cursor, stored)?;
                }

                Ok(cursor)
            }
        }
    }

    /// Decodes one record from the start of `data` into `record`. Returns the
    /// number of bytes consumed.
    ///
    /// `record` is only written once the whole input has been validated, so on
    /// error it keeps its previous values.
    pub fn decode_into(&self, data: &[u8], record: &mut Record) -> Result<usize, RangeError> {
        match self.layout {
            Layout::BitPacked { .. } => {
                let size = self.buffer_size();
                if data.len() < size {
                    return Err(RangeError::BufferTooShort {
                        required: size,
                        actual: data.len(),
                    });
                }

                record.resize(self.fields.len());
                for field in &self.fields {
                    record[field.index] = field.from_stored(field.read(data));
                }

                Ok(size)
            }
            Layout::Varint => {
                let mut end = 0;
                for _ in &self.fields {
                    end += transform::read_varint(data, end)?.1;
                }

                record.resize(self.fields.len());
                let mut cursor = 0;

                for field in &self.fields {
                    let (stored, read) = transform::read_varint(data, cursor)?;
                    record[field.index] = field.from_stored(stored);
                    cursor += read;
                }

                Ok(cursor)
            }
        }
    }

    fn stored(
        &self,
        field: &CompiledField,
        raw: f64,
        policy: OverflowPolicy,
    ) -> Result<u64, EncodeError> {
        field
            .to_stored(raw, policy)
            .map_err(|_| EncodeError::Overflow {
                field: field.name.clone(),
                value: raw,
            })
    }
}
