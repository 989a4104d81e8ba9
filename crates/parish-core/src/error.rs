//! Error types for parish-core.
//!
//! A single error type with explicit variants for transport, authentication,
//! store, input validation and workflow failures. Not-found on reads is not
//! an error; it surfaces as `Ok(None)`.

use std::fmt;
use thiserror::Error;

/// The unified error type for store and accessor operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport errors (connection, timeout, HTTP, filesystem IO).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected token, missing session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The store answered with a failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A status workflow step that is not allowed.
    #[error("workflow error: {0}")]
    Workflow(#[from] WorkflowError),
}

impl Error {
    /// Returns true if this error means the addressed document does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Store(e) if e.is_not_found())
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Filesystem error.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The store rejected the supplied token.
    #[error("credentials rejected: {0}")]
    Rejected(String),

    /// The operation needs a signed-in user.
    #[error("no active session")]
    SessionRequired,

    /// The signed-in user may not perform this operation.
    #[error("user '{user}' is not allowed to {action}")]
    Forbidden { user: String, action: String },
}

/// A failure reported by the store for a specific request.
#[derive(Debug)]
pub struct StoreError {
    /// HTTP-style status code.
    pub status: u16,
    /// Short machine-readable code, if any.
    pub code: Option<String>,
    /// Human-readable message, if any.
    pub message: Option<String>,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    /// Create a new store error.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// A 404 for the given document path.
    pub fn not_found(path: impl fmt::Display) -> Self {
        Self::new(
            404,
            Some("NotFound".to_string()),
            Some(format!("{} does not exist", path)),
        )
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Check if the store refused the request's credentials.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Unknown collection name.
    #[error("invalid collection '{value}': {reason}")]
    Collection { value: String, reason: String },

    /// Invalid record key.
    #[error("invalid record id '{value}': {reason}")]
    RecordId { value: String, reason: String },

    /// Invalid `collection/id` path.
    #[error("invalid record path '{value}': {reason}")]
    RecordPath { value: String, reason: String },

    /// Invalid store URL.
    #[error("invalid store URL '{value}': {reason}")]
    StoreUrl { value: String, reason: String },

    /// A document that is not a JSON object, or does not fit the record shape.
    #[error("invalid document: {reason}")]
    Document { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

impl From<serde_json::Error> for InvalidInputError {
    fn from(err: serde_json::Error) -> Self {
        InvalidInputError::Document {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(InvalidInputError::from(err))
    }
}

/// Status workflow errors.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The record's current status does not allow the requested step.
    #[error("cannot move {path} from '{from}' to '{to}'")]
    InvalidTransition {
        path: String,
        from: String,
        to: String,
    },

    /// The collection has no such workflow.
    #[error("{collection} does not support {action}")]
    Unsupported { collection: String, action: String },

    /// Release details were rejected.
    #[error("invalid release: {reason}")]
    Release { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display_includes_code_and_message() {
        let err = StoreError::new(
            400,
            Some("Invalid".to_string()),
            Some("bad path".to_string()),
        );
        assert_eq!(err.to_string(), "status 400 [Invalid]: bad path");
    }

    #[test]
    fn not_found_is_detected_through_error() {
        let err: Error = StoreError::not_found("priests/abc").into();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("priests/abc"));
    }

    #[test]
    fn auth_statuses() {
        assert!(StoreError::new(401, None, None).is_auth_error());
        assert!(StoreError::new(403, None, None).is_auth_error());
        assert!(!StoreError::new(500, None, None).is_auth_error());
    }
}
