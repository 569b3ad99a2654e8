//! Data ingestion and structured value access
//!
//! The evaluator only ever sees `serde_json::Value`. Record-style data
//! (JSON objects) is used as is; attribute-style data (any Rust value
//! implementing `Serialize`) is converted once at this boundary.

use serde::Serialize;
use serde_json::Value;

use crate::errors::ValidatorResult;

/// Keyed access to a data node.
pub trait StructuredValue {
    /// Returns the property `key`, if present
    fn field(&self, key: &str) -> Option<&Value>;
}

impl StructuredValue for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }
}

/// Converts a serializable value into a data node.
pub fn ingest<T: Serialize + ?Sized>(data: &T) -> ValidatorResult<Value> {
    Ok(serde_json::to_value(data)?)
}
