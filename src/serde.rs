//! JSON‑deserializable schema description.
//!
//! These types describe the fields of a record as configuration, for example a
//! schema file shipped with your application, and are compiled into a
//! [crate::schema::Schema].
//!
//! ```json
//! {
//!   "fields": [
//!     { "name": "x", "kind": "int", "bits": 32, "precision": 100 },
//!     { "name": "flags", "kind": "uint", "bits": 3 }
//!   ]
//! }
//! ```
//!
//! A bare array of field objects is accepted as well.

use serde::{Deserialize, Serialize};

use crate::{errors::SchemaError, field::Field, schema::Schema};

/// Top‑level schema definition consisting of a list of fields.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(from = "SchemaDefRepr")]
pub struct SchemaDef {
    /// Fields in wire order.
    pub fields: Vec<FieldDef>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaDefRepr {
    Object { fields: Vec<FieldDef> },
    List(Vec<FieldDef>),
}

impl From<SchemaDefRepr> for SchemaDef {
    fn from(value: SchemaDefRepr) -> Self {
        match value {
            SchemaDefRepr::Object { fields } | SchemaDefRepr::List(fields) => SchemaDef { fields },
        }
    }
}

/// Description of a single field.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name; becomes the key in maps produced by [Schema::to_map].
    pub name: String,
    /// One of `uint`, `int` or `varint`.
    #[serde(alias = "type")]
    pub kind: String,
    /// Width in bits, required for `uint` and `int`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
    /// Fixed‑point scalar; defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
}

impl TryFrom<SchemaDef> for Schema {
    type Error = SchemaError;

    fn try_from(value: SchemaDef) -> Result<Self, Self::Error> {
        let fields = value
            .fields
            .into_iter()
            .map(Field::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Schema::compile(&fields)
    }
}

impl Schema {
    /// Parses a JSON schema description and compiles it.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let def: SchemaDef =
            serde_json::from_str(json).map_err(|e| SchemaError::InvalidDefinition(e.to_string()))?;
        Schema::try_from(def)
    }
}
