//! Record path type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Collection, RecordId};
use crate::error::{Error, InvalidInputError};

/// The store address of one record: `<collection>/<id>`.
///
/// # Example
///
/// ```
/// use parish_core::{Collection, RecordPath};
///
/// let path = RecordPath::new("priests/-NxQb3kd9Fh2LmQpTzA1").unwrap();
/// assert_eq!(path.collection(), Collection::Priests);
/// assert_eq!(path.id().as_str(), "-NxQb3kd9Fh2LmQpTzA1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordPath {
    collection: Collection,
    id: RecordId,
}

impl RecordPath {
    /// Parse `<collection>/<id>`.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: String| -> Error {
            InvalidInputError::RecordPath {
                value: s.to_string(),
                reason,
            }
            .into()
        };

        let (collection, id) = s
            .split_once('/')
            .ok_or_else(|| invalid("must have format '<collection>/<id>'".to_string()))?;
        let collection = Collection::new(collection)
            .map_err(|_| invalid(format!("unknown collection: {}", collection)))?;
        let id = RecordId::new(id).map_err(|_| invalid(format!("invalid id: {}", id)))?;

        Ok(Self { collection, id })
    }

    pub fn from_parts(collection: Collection, id: RecordId) -> Self {
        Self { collection, id }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

impl FromStr for RecordPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for RecordPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordPath::new(&s).map_err(serde::de::Error::custom)
    }
}
