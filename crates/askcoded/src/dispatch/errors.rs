//! Error types for request dispatch failures.
//!
//! Every variant is shaped into a status string before it reaches the socket:
//! decode failures become "No data?" and pipeline failures become
//! "Error looking up code action". The variants exist so the cause can be
//! logged precisely.

use std::io;

use thiserror::Error;

use crate::editor::EditorError;

/// Errors surfaced while decoding, routing or answering a request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The connection closed without sending a payload.
    #[error("request payload is empty")]
    MissingPayload,

    /// The payload is not a JSON document describing a known request.
    #[error("malformed request: {message}")]
    MalformedRequest {
        /// Human-readable cause.
        message: String,
        /// Underlying decode error, when there is one.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Request exceeds the maximum allowed size.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Bytes received so far.
        size: usize,
        /// Configured ceiling.
        max_size: usize,
    },

    /// IO error during read or write.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Response serialization failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[source] serde_json::Error),

    /// The host editor failed while serving the request.
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Internal error (e.g., lock poisoned).
    #[error("internal error: {message}")]
    Internal {
        /// Description of the broken invariant.
        message: String,
    },
}

impl DispatchError {
    /// Returns true when the error stems from the client's payload rather
    /// than from the bridge or the host.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingPayload | Self::MalformedRequest { .. } | Self::RequestTooLarge { .. }
        )
    }

    /// Creates a malformed request error from a serde error.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedRequest {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed request error with a custom message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a request too large error.
    #[must_use]
    pub const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
