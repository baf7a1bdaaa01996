//! Response types written back to clients.
//!
//! Every exchange ends with exactly one [`BridgeResponse`] serialized as a
//! single JSON document with no framing.

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::DispatchError;

/// Status reported for a successful ping.
pub const STATUS_PONG: &str = "Pong";
/// Status reported once a workspace switch has been requested.
pub const STATUS_CHANGING_WORKSPACE: &str = "Changing workspace...";
/// Status reported when the request targets another workspace.
pub const STATUS_WRONG_WORKSPACE: &str = "Please change to correct workspace";
/// Status reported when polling found no code actions.
pub const STATUS_NO_ACTIONS: &str = "No actions returned";
/// Status reported when the code-action pipeline failed.
pub const STATUS_LOOKUP_FAILED: &str = "Error looking up code action";
/// Status reported for payloads that could not be decoded.
pub const STATUS_NO_DATA: &str = "No data?";

/// Discriminator for responses that carry a `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseKind {
    /// Answer to `Ping`.
    Pong,
    /// Answer carrying code actions.
    CodeAction,
    /// The request targeted a workspace that is not open.
    WrongWorkspace,
}

/// A code action in wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireCodeAction {
    /// Label shown to the user.
    pub title: String,
    /// Whole-buffer replacement, present only for apply-all actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer: Option<String>,
    /// Opaque edit descriptors passed through from the host.
    #[serde(rename = "textChanges", default)]
    pub text_changes: Vec<Value>,
}

impl WireCodeAction {
    /// An action that edits through text changes.
    #[must_use]
    pub fn with_text_changes(title: impl Into<String>, text_changes: Vec<Value>) -> Self {
        Self {
            title: title.into(),
            buffer: None,
            text_changes,
        }
    }

    /// An action that replaces the whole buffer.
    #[must_use]
    pub fn with_buffer(title: impl Into<String>, buffer: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            buffer: Some(buffer.into()),
            text_changes: Vec::new(),
        }
    }
}

/// The single response of an exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResponse {
    /// Human-readable outcome; always present.
    pub status: String,
    /// Machine-readable outcome, when the response carries one.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResponseKind>,
    /// Shaped code actions, only for [`ResponseKind::CodeAction`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<WireCodeAction>>,
}

impl BridgeResponse {
    fn status_only(status: &str) -> Self {
        Self {
            status: status.to_owned(),
            kind: None,
            actions: None,
        }
    }

    /// Answer to `Ping`.
    #[must_use]
    pub fn pong() -> Self {
        Self {
            kind: Some(ResponseKind::Pong),
            ..Self::status_only(STATUS_PONG)
        }
    }

    /// Acknowledges a workspace switch without waiting for it.
    #[must_use]
    pub fn changing_workspace() -> Self {
        Self::status_only(STATUS_CHANGING_WORKSPACE)
    }

    /// The request targets a workspace that is not open.
    #[must_use]
    pub fn wrong_workspace() -> Self {
        Self {
            kind: Some(ResponseKind::WrongWorkspace),
            ..Self::status_only(STATUS_WRONG_WORKSPACE)
        }
    }

    /// Polling completed without results.
    #[must_use]
    pub fn no_actions() -> Self {
        Self::status_only(STATUS_NO_ACTIONS)
    }

    /// Shaped code actions; an empty list collapses to [`Self::no_actions`].
    #[must_use]
    pub fn code_actions(actions: Vec<WireCodeAction>) -> Self {
        if actions.is_empty() {
            return Self::no_actions();
        }
        Self {
            status: format!("{} actions returned", actions.len()),
            kind: Some(ResponseKind::CodeAction),
            actions: Some(actions),
        }
    }

    /// The code-action pipeline failed.
    #[must_use]
    pub fn lookup_failed() -> Self {
        Self::status_only(STATUS_LOOKUP_FAILED)
    }

    /// The payload was absent or could not be decoded.
    #[must_use]
    pub fn no_data() -> Self {
        Self::status_only(STATUS_NO_DATA)
    }
}

/// Writer that serializes a response to a stream.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Creates a new response writer wrapping the given output stream.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `response` as one JSON document and flushes the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, writing or flushing fails.
    pub fn write_response(&mut self, response: &BridgeResponse) -> Result<(), DispatchError> {
        let bytes = serde_json::to_vec(response).map_err(DispatchError::SerializeResponse)?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(())
    }
}
