//! Request deserialization for the dispatch loop.
//!
//! A request is one JSON object discriminated by its `type` field. Position
//! fields may arrive as numbers or as numeric strings; anything that is not a
//! positive integer is rejected here so no invalid position reaches the
//! editor.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::editor::WirePosition;

use super::errors::DispatchError;

/// A decoded client request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeRequest {
    /// Liveness check.
    Ping,
    /// Reopen the IDE on another workspace root.
    ChangeWorkspace(ChangeWorkspaceRequest),
    /// Stage a buffer and collect code actions at a cursor.
    CodeAction(CodeActionRequest),
}

impl BridgeRequest {
    /// Parses a raw payload into a request.
    ///
    /// Surrounding whitespace, including a trailing newline, is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingPayload`] for an empty payload and
    /// [`DispatchError::MalformedRequest`] for anything that does not decode
    /// into a known request, including `null` and unknown `type` tags.
    pub fn parse(payload: &[u8]) -> Result<Self, DispatchError> {
        let trimmed = payload.trim_ascii();
        if trimmed.is_empty() {
            return Err(DispatchError::MissingPayload);
        }
        serde_json::from_slice(trimmed).map_err(DispatchError::from_json_error)
    }

    /// Wire name of the request kind, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Ping => "Ping",
            Self::ChangeWorkspace(_) => "ChangeWorkspace",
            Self::CodeAction(_) => "CodeAction",
        }
    }
}

/// Payload of a `ChangeWorkspace` request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeWorkspaceRequest {
    root_path: Utf8PathBuf,
}

impl ChangeWorkspaceRequest {
    /// Creates a request for `root_path`.
    #[must_use]
    pub fn new(root_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
        }
    }

    /// Workspace the client wants the IDE to show.
    #[must_use]
    pub fn root_path(&self) -> &Utf8Path {
        &self.root_path
    }
}

/// Payload of a `CodeAction` request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCodeActionRequest")]
pub struct CodeActionRequest {
    root_path: Utf8PathBuf,
    file_path: String,
    buffer: String,
    position: WirePosition,
}

impl CodeActionRequest {
    /// Creates a request from already validated parts.
    #[must_use]
    pub fn new(
        root_path: impl Into<Utf8PathBuf>,
        file_path: impl Into<String>,
        buffer: impl Into<String>,
        position: WirePosition,
    ) -> Self {
        Self {
            root_path: root_path.into(),
            file_path: file_path.into(),
            buffer: buffer.into(),
            position,
        }
    }

    /// Workspace the client believes is open.
    #[must_use]
    pub fn root_path(&self) -> &Utf8Path {
        &self.root_path
    }

    /// File name or glob to look up in the workspace.
    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Full buffer contents to stage.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// One-based cursor position.
    #[must_use]
    pub const fn position(&self) -> WirePosition {
        self.position
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCodeActionRequest {
    root_path: Utf8PathBuf,
    file_path: String,
    buffer: String,
    line: WireInteger,
    #[serde(default)]
    column: Option<WireInteger>,
    #[serde(default)]
    offset: Option<WireInteger>,
}

impl TryFrom<RawCodeActionRequest> for CodeActionRequest {
    type Error = String;

    fn try_from(raw: RawCodeActionRequest) -> Result<Self, Self::Error> {
        let line = raw.line.to_u32("line")?;
        let offset = match (raw.offset, raw.column) {
            (Some(given), _) => given.to_u32("offset")?,
            (None, Some(column)) => column.to_u32("column")?,
            (None, None) => return Err("missing field `offset`".to_owned()),
        };
        let position = WirePosition::new(line, offset).map_err(|error| error.to_string())?;
        Ok(Self {
            root_path: raw.root_path,
            file_path: raw.file_path,
            buffer: raw.buffer,
            position,
        })
    }
}

/// Integer that clients may send either as a JSON number or as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireInteger {
    Number(u64),
    Text(String),
}

impl WireInteger {
    fn to_u32(&self, field: &str) -> Result<u32, String> {
        let parsed = match self {
            Self::Number(number) => u32::try_from(*number).ok(),
            Self::Text(text) => text.trim().parse::<u32>().ok(),
        };
        parsed
            .filter(|value| *value > 0)
            .ok_or_else(|| format!("`{field}` must be a positive integer"))
    }
}
