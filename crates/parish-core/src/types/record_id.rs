//! Record key type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Maximum key length in bytes accepted by the store.
const MAX_LEN: usize = 768;

/// Characters the store does not allow inside a key.
const FORBIDDEN: &[char] = &['.', '$', '#', '[', ']', '/'];

/// A validated record key.
///
/// Keys are assigned by the store on creation and are stable for the
/// lifetime of the record.
///
/// # Example
///
/// ```
/// use parish_core::RecordId;
///
/// let id = RecordId::new("-NxQb3kd9Fh2LmQpTzA1").unwrap();
/// assert_eq!(id.as_str(), "-NxQb3kd9Fh2LmQpTzA1");
/// assert!(RecordId::new("a/b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Accepts any non-empty key of at most 768 bytes without control
    /// characters or any of `. $ # [ ] /`.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        let problem = if s.is_empty() {
            Some("cannot be empty".to_string())
        } else if s.len() > MAX_LEN {
            Some(format!("exceeds maximum length of {} bytes", MAX_LEN))
        } else {
            s.chars()
                .find(|c| FORBIDDEN.contains(c) || c.is_ascii_control())
                .map(|c| format!("contains invalid character {:?}", c))
        };

        match problem {
            Some(reason) => Err(InvalidInputError::RecordId { value: s, reason }.into()),
            None => Ok(Self(s)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_push_key() {
        let id = RecordId::new("-NxQb3kd9Fh2LmQpTzA1").unwrap();
        assert_eq!(id.as_str(), "-NxQb3kd9Fh2LmQpTzA1");
    }

    #[test]
    fn invalid_empty() {
        assert!(RecordId::new("").is_err());
    }

    #[test]
    fn invalid_characters() {
        for bad in ["a.b", "a$b", "a#b", "a[b", "a]b", "a/b", "a\nb"] {
            assert!(RecordId::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn invalid_too_long() {
        assert!(RecordId::new("x".repeat(MAX_LEN + 1)).is_err());
        assert!(RecordId::new("x".repeat(MAX_LEN)).is_ok());
    }

    #[test]
    fn deserialize_validates() {
        let result: Result<RecordId, _> = serde_json::from_str("\"bad/key\"");
        assert!(result.is_err());
    }
}
