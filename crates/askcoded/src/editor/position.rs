//! Cursor positions as sent by clients.

use std::fmt;

use lsp_types::Position;
use thiserror::Error;

/// One-based cursor position as it appears on the wire.
///
/// Editors such as Vim count lines and columns from one; the host counts
/// from zero. Construction rejects zero so the conversion in
/// [`WirePosition::to_zero_based`] can never underflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WirePosition {
    line: u32,
    offset: u32,
}

impl WirePosition {
    /// Validates a one-based line and character offset.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPosition`] when either component is zero.
    pub const fn new(line: u32, offset: u32) -> Result<Self, InvalidPosition> {
        if line == 0 {
            return Err(InvalidPosition::ZeroLine);
        }
        if offset == 0 {
            return Err(InvalidPosition::ZeroOffset);
        }
        Ok(Self { line, offset })
    }

    /// One-based line.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// One-based character offset.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Host position: both components decremented by exactly one.
    #[must_use]
    pub const fn to_zero_based(self) -> Position {
        Position {
            line: self.line - 1,
            character: self.offset - 1,
        }
    }
}

impl fmt::Display for WirePosition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.line, self.offset)
    }
}

/// Rejected wire positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPosition {
    /// Lines are one-based.
    #[error("line must be at least 1")]
    ZeroLine,
    /// Offsets are one-based.
    #[error("offset must be at least 1")]
    ZeroOffset,
}
