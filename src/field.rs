//! Definition of logical fields used to build a [crate::schema::Schema].

/// A single named numeric field in a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Name used to address the field in a [crate::record::Record].
    pub name: String,
    /// How the value is stored on the wire.
    pub kind: FieldKind,
    /// Width in bits; required for fixed-width kinds (1..=32), ignored for varints.
    pub bits: Option<u32>,
    /// Fixed-point scalar applied before encoding and removed after decoding.
    pub precision: f64,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind, bits: Option<u32>) -> Self {
        Field {
            name: name.into(),
            kind,
            bits,
            precision: 1.0,
        }
    }

    /// Unsigned fixed-width field.
    pub fn uint(name: impl Into<String>, bits: u32) -> Self {
        Self::new(name, FieldKind::FixedUint, Some(bits))
    }

    /// Two's-complement signed fixed-width field.
    pub fn int(name: impl Into<String>, bits: u32) -> Self {
        Self::new(name, FieldKind::FixedInt, Some(bits))
    }

    /// Zigzag varint field.
    pub fn varint(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Varint, None)
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }
}

#[cfg(feature = "serde")]
impl TryFrom<crate::serde::FieldDef> for Field {
    type Error = crate::errors::SchemaError;

    fn try_from(value: crate::serde::FieldDef) -> Result<Self, Self::Error> {
        Ok(Field {
            kind: value.kind.parse()?,
            name: value.name,
            bits: value.bits,
            precision: value.precision.unwrap_or(1.0),
        })
    }
}

/// Storage strategy of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Unsigned integer packed into a fixed number of bits.
    FixedUint,
    /// Signed integer packed into a fixed number of bits with a two's-complement bias.
    FixedInt,
    /// Zigzag-mapped integer written as 7-bit continuation groups.
    Varint,
}

impl FieldKind {
    pub fn is_fixed(&self) -> bool {
        !matches!(self, FieldKind::Varint)
    }
}

impl std::str::FromStr for FieldKind {
    type Err = crate::errors::SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uint" => Ok(FieldKind::FixedUint),
            "int" => Ok(FieldKind::FixedInt),
            "varint" => Ok(FieldKind::Varint),
            other => Err(crate::errors::SchemaError::UnknownKind(other.to_string())),
        }
    }
}
