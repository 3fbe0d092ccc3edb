use serde::Serialize;
use serde_json::Value;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Column names of the output table, in serialization order.
pub const LISTING_FIELDS: [&str; 11] = [
    "_id",
    "adId",
    "brand",
    "series",
    "model",
    "year",
    "km",
    "price",
    "createdAt",
    "updatedAt",
    "__v",
];

/// One cell of a normalized row.
///
/// Only the shapes a decoded listing can actually produce are modeled;
/// nested objects and arrays are carried as their compact JSON text
/// instead of a full value tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent or explicitly-null source value. Serializes to an empty field.
    Null,
    Bool(bool),
    Num(serde_json::Number),
    Str(String),
    /// Nested object or array, re-serialized as compact JSON text.
    Opaque(String),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => FieldValue::Num(n),
            Value::String(s) => FieldValue::Str(s),
            nested => FieldValue::Opaque(nested.to_string()),
        }
    }
}

/// A listing record projected onto the fixed output schema.
///
/// Field order matches [`LISTING_FIELDS`] and is identical for every row,
/// no matter which keys the source object carried.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRow {
    #[serde(rename = "_id")]
    pub id: FieldValue,
    #[serde(rename = "adId")]
    pub ad_id: FieldValue,
    pub brand: FieldValue,
    pub series: FieldValue,
    pub model: FieldValue,
    pub year: FieldValue,
    pub km: FieldValue,
    pub price: FieldValue,
    #[serde(rename = "createdAt")]
    pub created_at: FieldValue,
    #[serde(rename = "updatedAt")]
    pub updated_at: FieldValue,
    #[serde(rename = "__v")]
    pub version: FieldValue,
}

/// Failure modes of an extraction run.
///
/// Malformed object spans are deliberately not represented here: a span
/// that does not decode is dropped where it is found and scanning
/// continues with the rest of the file.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// An input file (or the directory scanned for default inputs) could
    /// not be read.
    #[error("failed to read {}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file or its parent directory could not be created.
    #[error("failed to open output {}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The header or a row failed to reach the output.
    #[error("failed to write csv output")]
    Csv(#[from] csv::Error),

    /// The run was given nothing to extract from.
    #[error("no input files found")]
    NoInputFiles,
}
