//! Narrow interfaces onto the host IDE.
//!
//! The bridge never talks to an IDE directly. It drives an [`EditorBridge`]
//! for document state and analysis, a [`WorkspaceSwitcher`] to reopen the
//! IDE on another root, and a [`HostUi`] for user-facing notices.
//! [`LocalEditor`], [`EditorCliLauncher`] and [`LoggingHostUi`] are the
//! implementations used by the `askcoded` binary.

mod errors;
mod launcher;
mod local;
mod position;
mod ui;

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use lsp_types::{CodeAction, Position};

pub use self::errors::EditorError;
pub use self::launcher::EditorCliLauncher;
pub use self::local::{CodeActionProvider, DocumentSnapshot, LocalEditor, NoCodeActions};
pub use self::position::{InvalidPosition, WirePosition};
pub use self::ui::LoggingHostUi;

/// Tracing target for editor host operations.
pub(crate) const EDITOR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::editor");

/// Document and analysis operations of the host IDE.
///
/// All mutating operations act on a single shared active editor, so callers
/// must serialise pipelines that stage buffers.
#[cfg_attr(test, mockall::automock)]
pub trait EditorBridge: Send + Sync {
    /// Root directory of the currently open workspace, if any.
    fn workspace_root(&self) -> Option<Utf8PathBuf>;

    /// Locates the first workspace file matching `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::FileNotFound`] when nothing matches.
    fn find_file(&self, name: &str) -> Result<Utf8PathBuf, EditorError>;

    /// Opens `path` in the active view, preserving focus and using preview
    /// mode. Resolves to the opened path.
    ///
    /// # Errors
    ///
    /// Returns an error when the document cannot be loaded.
    fn open_file(&self, path: &Utf8Path) -> Result<Utf8PathBuf, EditorError>;

    /// Replaces the full content of the active document in one edit.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveEditor`] when no document is open.
    fn set_buffer(&self, text: &str) -> Result<(), EditorError>;

    /// Collapses the active selection to a zero-based cursor.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveEditor`] when no document is open.
    fn set_selection(&self, position: Position) -> Result<(), EditorError>;

    /// Asks the analysis engine for code actions at a zero-width range.
    ///
    /// An empty result is legitimate while the engine is still indexing.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine itself fails.
    fn query_code_actions(
        &self,
        path: &Utf8Path,
        position: Position,
    ) -> Result<Vec<CodeAction>, EditorError>;

    /// Full text of the active document.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveEditor`] when no document is open.
    fn document_text(&self) -> Result<String, EditorError>;
}

/// Reopens the host IDE on a different workspace root.
#[cfg_attr(test, mockall::automock)]
pub trait WorkspaceSwitcher: Send + Sync {
    /// Requests the switch and returns without waiting for it. Failures are
    /// reported to the user, never returned.
    fn switch_workspace(&self, path: &Utf8Path, new_window: bool);
}

/// User-facing notification surface of the host.
#[cfg_attr(test, mockall::automock)]
pub trait HostUi: Send + Sync {
    /// Shows an informational notice.
    fn show_info(&self, message: &str);

    /// Shows an error notice.
    fn show_error(&self, message: &str);

    /// Shows a warning with a single action button and blocks until the user
    /// answers. Returns true when the action was chosen.
    fn prompt(&self, message: &str, action: &str) -> bool;
}

/// The host collaborators shared by the router and the code-action pipeline.
#[derive(Clone)]
pub struct EditorHost {
    /// Document and analysis operations.
    pub editor: Arc<dyn EditorBridge>,
    /// Workspace reopen side effect.
    pub switcher: Arc<dyn WorkspaceSwitcher>,
    /// Notification surface.
    pub ui: Arc<dyn HostUi>,
}

impl EditorHost {
    /// Bundles host collaborators.
    #[must_use]
    pub const fn new(
        editor: Arc<dyn EditorBridge>,
        switcher: Arc<dyn WorkspaceSwitcher>,
        ui: Arc<dyn HostUi>,
    ) -> Self {
        Self {
            editor,
            switcher,
            ui,
        }
    }
}
