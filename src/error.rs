//! Error types for skill-kit.

use thiserror::Error;

/// Name given to the error raised when no request handler matches.
pub const UNHANDLED_REQUEST_ERROR: &str = "AskSdk.RequestDispatcher Error";

/// Error returned by handler and interceptor callbacks.
///
/// Error handlers match on [`HandlerError::name`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {message}")]
pub struct HandlerError {
    name: String,
    message: String,
}

impl HandlerError {
    /// Create a new error with the given name and message.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Error raised when no request handler accepted a request.
    pub fn unhandled_request(request_type: &str, intent_name: Option<&str>) -> Self {
        let message = match intent_name {
            Some(intent) => format!(
                "Unable to find a suitable request handler for {} ({})",
                request_type, intent
            ),
            None => format!(
                "Unable to find a suitable request handler for {}",
                request_type
            ),
        };
        Self::new(UNHANDLED_REQUEST_ERROR, message)
    }

    /// Get the error name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::new("JsonError", err.to_string())
    }
}

/// Main error type for skill invocation.
#[derive(Debug, Error)]
pub enum SkillError {
    /// No error handler claimed a failure raised during dispatch.
    #[error("Unhandled error: {0}")]
    Unhandled(HandlerError),

    /// Request was addressed to a different skill.
    #[error("Skill ID mismatch: expected {expected}, got {actual}")]
    SkillIdMismatch { expected: String, actual: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using SkillError.
pub type Result<T> = std::result::Result<T, SkillError>;
