//! Reusable encoder/decoder that owns its scratch buffer and output record.

use crate::{
    errors::{EncodeError, RangeError},
    record::Record,
    schema::Schema,
    transform::OverflowPolicy,
};

/// Encodes and decodes records of one [Schema].
///
/// The buffer and the decoded [Record] are allocated once in [Codec::new] and
/// overwritten by every call. Clone the record returned by [Codec::decode] to
/// keep it past the next call. A codec is meant for one consumer at a time;
/// share the [Schema] and build one codec per thread instead.
#[derive(Debug, Clone)]
pub struct Codec {
    schema: Schema,
    policy: OverflowPolicy,
    buffer: Vec<u8>,
    len: usize,
    record: Record,
}

impl Codec {
    pub fn new(schema: Schema) -> Self {
        Self::with_policy(schema, OverflowPolicy::default())
    }

    pub fn with_policy(schema: Schema, policy: OverflowPolicy) -> Self {
        let buffer = vec![0u8; schema.max_encoded_len()];
        let record = schema.record();

        log::debug!(
            "codec ready: {} byte buffer, {:?} overflow policy",
            buffer.len(),
            policy
        );

        Codec {
            schema,
            policy,
            buffer,
            len: 0,
            record,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Bytes produced by the last successful [Codec::encode].
    pub fn buffer(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// Record produced by the last successful decode.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Encodes `record` into the owned buffer and returns the written bytes.
    pub fn encode(&mut self, record: &Record) -> Result<&[u8], EncodeError> {
        self.len = 0;
        self.len = self
            .schema
            .encode_into(record, &mut self.buffer, self.policy)?;

        Ok(&self.buffer[..self.len])
    }

    /// Decodes `data` into the owned record.
    pub fn decode(&mut self, data: &[u8]) -> Result<&Record, RangeError> {
        self.schema.decode_into(data, &mut self.record)?;
        Ok(&self.record)
    }

    /// Decodes the bytes of the last [Codec::encode].
    pub fn decode_buffer(&mut self) -> Result<&Record, RangeError> {
        self.schema
            .decode_into(&self.buffer[..self.len], &mut self.record)?;
        Ok(&self.record)
    }
}
