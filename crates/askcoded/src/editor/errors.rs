//! Error types for editor host operations.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures reported by an [`EditorBridge`](super::EditorBridge).
#[derive(Debug, Error)]
pub enum EditorError {
    /// No workspace file matched the requested name.
    #[error("no file matching '{name}' in the workspace")]
    FileNotFound {
        /// Name or glob that was searched for.
        name: String,
    },

    /// An operation needed an open document but none was active.
    #[error("no active editor")]
    NoActiveEditor,

    /// The requested file name is not a valid glob.
    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern built from the requested name.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: globset::Error,
    },

    /// Walking the workspace failed.
    #[error("failed to search workspace: {source}")]
    Walk {
        /// Underlying walker error.
        #[source]
        source: ignore::Error,
    },

    /// Reading a document from disk failed.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// File that could not be read.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The analysis engine failed to compute code actions.
    #[error("code action provider failed: {message}")]
    Provider {
        /// Provider-specific description.
        message: String,
    },

    /// Shared editor state was poisoned by a panicking thread.
    #[error("editor state lock poisoned")]
    StatePoisoned,
}

impl EditorError {
    /// Creates a file-not-found error.
    #[must_use]
    pub fn file_not_found(name: impl Into<String>) -> Self {
        Self::FileNotFound { name: name.into() }
    }

    /// Creates a provider error.
    #[must_use]
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }
}
