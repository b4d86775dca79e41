//! Error types for schema compilation, bit access and record encoding.

use thiserror::Error;

/// Errors produced when compiling a list of [crate::field::Field]s into a [crate::schema::Schema].
///
/// A schema that fails to compile never becomes usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Field name is empty.
    #[error("field name must not be empty")]
    InvalidFieldName,
    /// Two fields share the same name.
    #[error("duplicate field name `{0}`")]
    DuplicateField(String),
    /// Fixed-width field declared without a bit width.
    #[error("field `{0}` requires a bit width")]
    MissingBitWidth(String),
    /// Fixed-width field with a bit width outside 1..=32.
    #[error("field `{name}` has bit width {bits}, expected 1..=32")]
    InvalidBitWidth { name: String, bits: u32 },
    /// Precision is zero, negative or not finite.
    #[error("field `{name}` has a precision that is not a finite positive number")]
    InvalidPrecision { name: String },
    /// Kind string in a schema description is not one of `uint`, `int`, `varint`.
    #[error("unknown field kind `{0}`")]
    UnknownKind(String),
    /// Fixed-width and varint fields were combined in one schema.
    #[error("fixed-width and varint fields cannot be mixed in one schema")]
    MixedLayout,
    /// Schema description could not be deserialized.
    #[error("invalid schema definition: {0}")]
    InvalidDefinition(String),
}

/// Errors produced when a bit span or varint group does not fit the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Requested bit range is beyond the end of the buffer.
    #[error("bit span {bit_offset}+{width} exceeds buffer of {capacity} bytes")]
    OutOfBounds {
        bit_offset: usize,
        width: usize,
        capacity: usize,
    },
    /// More than 64 bits were requested in a single access.
    #[error("cannot access {0} bits at once, maximum is 64")]
    TooManyBits(usize),
    /// Buffer is shorter than the schema's fixed size.
    #[error("buffer of {actual} bytes is shorter than the required {required}")]
    BufferTooShort { required: usize, actual: usize },
    /// Buffer ended inside a varint group.
    #[error("buffer ended inside a varint at byte {pos}")]
    UnexpectedEnd { pos: usize },
    /// Varint has more continuation groups than a u64 can hold.
    #[error("varint starting at byte {pos} overflows 64 bits")]
    VarintOverflow { pos: usize },
}

/// Errors produced while encoding a [crate::record::Record].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Range(#[from] RangeError),
    /// Value does not fit the field under [crate::transform::OverflowPolicy::Reject].
    #[error("value {value} does not fit field `{field}`")]
    Overflow { field: String, value: f64 },
    /// Record was built for a schema with a different field count.
    #[error("record has {actual} values, schema expects {expected}")]
    RecordLength { expected: usize, actual: usize },
}

/// Errors produced when building a record from named values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Name does not belong to the schema.
    #[error("schema has no field named `{0}`")]
    UnknownField(String),
}
