//! # bitschema
//!
//! A schema-driven codec that packs flat records of numbers into the fewest
//! bytes possible.
//!
//! Describe the record as an ordered list of fields (bit width, signedness,
//! optional fixed-point precision), compile it once, then encode and decode as
//! many records as you like. Fixed-width fields are bit-packed back to back;
//! schemas made only of varint fields use zigzag 7-bit groups instead.
//!
//! ## Example
//!
//! ```
//! use bitschema::codec::Codec;
//! use bitschema::field::Field;
//! use bitschema::schema::Schema;
//!
//! let schema = Schema::compile(&[
//!     Field::int("x", 32).with_precision(10000.0),
//!     Field::uint("y", 24),
//! ])
//! .unwrap();
//! assert_eq!(schema.buffer_size(), 7);
//!
//! let record = schema.record_from([("x", 160.2216), ("y", 10.0)]).unwrap();
//!
//! let mut codec = Codec::new(schema);
//! let bytes = codec.encode(&record).unwrap().to_vec();
//! let decoded = codec.decode(&bytes).unwrap();
//! assert_eq!(decoded, &record);
//! ```
//!
//! ## Overflow
//!
//! By default values that do not fit their field are silently truncated to
//! the field's low bits. Build the codec with
//! [`OverflowPolicy::Reject`](transform::OverflowPolicy::Reject) to get an
//! [`EncodeError::Overflow`](errors::EncodeError::Overflow) instead.

pub mod bits;
pub mod chunk;
pub mod codec;
pub mod compiled;
pub mod errors;
pub mod field;
pub mod record;
pub mod schema;
#[cfg(feature = "serde")]
pub mod serde;
pub mod transform;
