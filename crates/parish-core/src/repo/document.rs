//! Validated document type for stored records.
//!
//! This module provides [`Document`], a type that guarantees the value is a
//! JSON object, which is the only shape the store keeps at a record path.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError};
use crate::types::RecordId;

/// Field holding the record key on read. Never written to the store.
pub const ID_FIELD: &str = "id";

/// Field stamped with the creation time.
pub const CREATED_FIELD: &str = "dateTimeStamp";

/// Field stamped with the last patch time.
pub const UPDATED_FIELD: &str = "updated";

/// A record body: a mapping from field name to JSON value.
///
/// # Example
///
/// ```
/// use parish_core::repo::Document;
/// use serde_json::json;
///
/// let doc = Document::new(json!({"name": "Fr. Santos"})).unwrap();
/// assert_eq!(doc.get("name").unwrap(), "Fr. Santos");
/// assert!(Document::new(json!([1, 2])).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Create a document from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a JSON object.
    pub fn new(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(InvalidInputError::Document {
                reason: format!("expected a JSON object, found {}", kind(&other)),
            }
            .into()),
        }
    }

    /// Create a document by serializing any value that maps to a JSON object.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        Self::new(serde_json::to_value(value)?)
    }

    /// Create an empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove a field.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Shallow merge: every top-level field of `changes` overwrites or adds
    /// the field of the same name; fields absent from `changes` survive.
    pub fn merge(&mut self, changes: &Document) {
        for (key, value) in &changes.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Returns true if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the record key injected on read, if any.
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_FIELD).and_then(Value::as_str)
    }

    /// Returns a copy of this document with `id` set to the given key.
    pub fn with_id(mut self, id: &RecordId) -> Self {
        self.0
            .insert(ID_FIELD.to_string(), Value::String(id.as_str().to_string()));
        self
    }

    /// Get a reference to the inner map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume and return the JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Document {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.into_value()
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Document::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_objects_are_rejected() {
        for value in [json!(null), json!(3), json!("text"), json!([1])] {
            let err = Document::new(value).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidInput(InvalidInputError::Document { .. })
            ));
        }
    }

    #[test]
    fn merge_keeps_untouched_fields() {
        let mut doc = Document::new(json!({"a": 1, "b": 2})).unwrap();
        doc.merge(&Document::new(json!({"b": 3, "c": 4})).unwrap());
        assert_eq!(doc.into_value(), json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn with_id_injects_key() {
        let id = RecordId::new("k1").unwrap();
        let doc = Document::new(json!({"name": "x"})).unwrap().with_id(&id);
        assert_eq!(doc.id(), Some("k1"));
    }

    #[test]
    fn deserialize_invalid_fails() {
        let result: Result<Document, _> = serde_json::from_str("[1, 2, 3]");
        assert!(result.is_err());
    }
}
