//! In-process editor model over a workspace directory.
//!
//! [`LocalEditor`] keeps one active document in memory, the same way an IDE
//! window has one focused editor. Files are located by walking the workspace
//! with the `ignore` walker and matching a `globset` pattern, and code actions
//! come from a pluggable [`CodeActionProvider`].

use std::fs;
use std::sync::{Arc, Mutex, MutexGuard};

use camino::{Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use lsp_types::{CodeAction, Position, Range};
use tracing::debug;

use super::{EDITOR_TARGET, EditorBridge, EditorError};

/// Read-only view of the active document handed to providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    /// File backing the document.
    pub path: Utf8PathBuf,
    /// Current buffer contents, possibly unsaved.
    pub text: String,
}

/// Analysis engine consulted for code actions.
pub trait CodeActionProvider: Send + Sync {
    /// Computes code actions for `range` in `document`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Provider`] when analysis fails.
    fn code_actions(
        &self,
        document: &DocumentSnapshot,
        range: Range,
    ) -> Result<Vec<CodeAction>, EditorError>;
}

/// Provider used when no analysis engine is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCodeActions;

impl CodeActionProvider for NoCodeActions {
    fn code_actions(
        &self,
        _document: &DocumentSnapshot,
        _range: Range,
    ) -> Result<Vec<CodeAction>, EditorError> {
        Ok(Vec::new())
    }
}

#[derive(Debug)]
struct ActiveDocument {
    path: Utf8PathBuf,
    text: String,
    cursor: Position,
}

/// Editor host backed by a workspace directory and one active document.
pub struct LocalEditor {
    root: Utf8PathBuf,
    provider: Arc<dyn CodeActionProvider>,
    active: Mutex<Option<ActiveDocument>>,
}

impl LocalEditor {
    /// Creates an editor rooted at `root` with no document open.
    ///
    /// The root is fixed for the editor's lifetime; a workspace switch does
    /// not move it.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>, provider: Arc<dyn CodeActionProvider>) -> Self {
        Self {
            root: root.into(),
            provider,
            active: Mutex::new(None),
        }
    }

    /// Workspace root served by this editor.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Zero-based cursor of the active document.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveEditor`] when no document is open.
    pub fn cursor(&self) -> Result<Position, EditorError> {
        let active = self.lock_active()?;
        active
            .as_ref()
            .map(|document| document.cursor)
            .ok_or(EditorError::NoActiveEditor)
    }

    fn lock_active(&self) -> Result<MutexGuard<'_, Option<ActiveDocument>>, EditorError> {
        self.active.lock().map_err(|_| EditorError::StatePoisoned)
    }

    fn matcher_for(name: &str) -> Result<GlobMatcher, EditorError> {
        let trimmed = name.trim_start_matches("./");
        let pattern = if trimmed.contains('/') {
            trimmed.to_owned()
        } else {
            format!("**/{trimmed}")
        };
        let mut builder = GlobBuilder::new(&pattern);
        builder.literal_separator(true);
        if cfg!(windows) {
            builder.case_insensitive(true);
        }
        builder
            .build()
            .map(|glob| glob.compile_matcher())
            .map_err(|source| EditorError::InvalidPattern { pattern, source })
    }

    fn find_absolute(&self, path: &Utf8Path) -> Result<Utf8PathBuf, EditorError> {
        if path.starts_with(&self.root) && path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(EditorError::file_not_found(path.as_str()))
        }
    }

    fn snapshot_for(&self, path: &Utf8Path) -> Result<DocumentSnapshot, EditorError> {
        let active = self.lock_active()?;
        if let Some(document) = active.as_ref().filter(|document| document.path == path) {
            return Ok(DocumentSnapshot {
                path: document.path.clone(),
                text: document.text.clone(),
            });
        }
        drop(active);
        let text = read_document(path)?;
        Ok(DocumentSnapshot {
            path: path.to_path_buf(),
            text,
        })
    }
}

impl EditorBridge for LocalEditor {
    fn workspace_root(&self) -> Option<Utf8PathBuf> {
        Some(self.root.clone())
    }

    fn find_file(&self, name: &str) -> Result<Utf8PathBuf, EditorError> {
        let requested = Utf8Path::new(name);
        if requested.is_absolute() {
            return self.find_absolute(requested);
        }

        let matcher = Self::matcher_for(name)?;
        // Every file counts: dotfiles and ignored files included.
        let mut walker = WalkBuilder::new(&self.root);
        walker
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false);

        let mut matches = Vec::new();
        for walked in walker.build() {
            let entry = walked.map_err(|source| EditorError::Walk { source })?;
            if !entry.file_type().is_some_and(|kind| kind.is_file()) {
                continue;
            }
            let Ok(candidate) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
                continue;
            };
            let Ok(relative) = candidate.strip_prefix(&self.root) else {
                continue;
            };
            if matcher.is_match(relative.as_std_path()) {
                matches.push(candidate);
            }
        }

        matches.sort();
        debug!(
            target: EDITOR_TARGET,
            name,
            matches = matches.len(),
            "searched workspace"
        );
        matches
            .into_iter()
            .next()
            .ok_or_else(|| EditorError::file_not_found(name))
    }

    fn open_file(&self, path: &Utf8Path) -> Result<Utf8PathBuf, EditorError> {
        let mut active = self.lock_active()?;
        if active.as_ref().is_some_and(|document| document.path == path) {
            return Ok(path.to_path_buf());
        }
        let text = read_document(path)?;
        *active = Some(ActiveDocument {
            path: path.to_path_buf(),
            text,
            cursor: Position::default(),
        });
        debug!(target: EDITOR_TARGET, path = %path, "opened document");
        Ok(path.to_path_buf())
    }

    fn set_buffer(&self, text: &str) -> Result<(), EditorError> {
        let mut active = self.lock_active()?;
        let document = active.as_mut().ok_or(EditorError::NoActiveEditor)?;
        text.clone_into(&mut document.text);
        Ok(())
    }

    fn set_selection(&self, position: Position) -> Result<(), EditorError> {
        let mut active = self.lock_active()?;
        let document = active.as_mut().ok_or(EditorError::NoActiveEditor)?;
        document.cursor = position;
        Ok(())
    }

    fn query_code_actions(
        &self,
        path: &Utf8Path,
        position: Position,
    ) -> Result<Vec<CodeAction>, EditorError> {
        let snapshot = self.snapshot_for(path)?;
        self.provider
            .code_actions(&snapshot, Range::new(position, position))
    }

    fn document_text(&self) -> Result<String, EditorError> {
        let active = self.lock_active()?;
        active
            .as_ref()
            .map(|document| document.text.clone())
            .ok_or(EditorError::NoActiveEditor)
    }
}

fn read_document(path: &Utf8Path) -> Result<String, EditorError> {
    fs::read_to_string(path).map_err(|source| EditorError::Read {
        path: path.to_path_buf(),
        source,
    })
}
