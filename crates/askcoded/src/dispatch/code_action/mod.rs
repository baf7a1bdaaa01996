//! The code-action pipeline.
//!
//! A `CodeAction` request flows through four stages:
//!
//! 1. **Guard**: the request root must match the open workspace, otherwise
//!    the user is offered a switch and the pipeline stops.
//! 2. **Stage**: under the per-root lock, the named file is located, opened,
//!    overwritten with the client's buffer and the cursor is placed.
//! 3. **Poll**: after a settle delay the engine is asked for code actions
//!    until it answers with a non-empty list or the attempt budget runs out.
//! 4. **Shape**: native actions are translated into the wire format.

mod guard;
mod locks;
mod shaper;

use std::thread;

use askcode_config::PollSettings;
use tracing::debug;

use crate::editor::EditorHost;
use crate::polling::poll_until_non_empty;

use self::guard::{GuardOutcome, check_workspace};
use self::locks::WorkspaceLocks;
use self::shaper::shape_actions;
use super::errors::DispatchError;
use super::request::CodeActionRequest;
use super::response::BridgeResponse;
use super::router::DISPATCH_TARGET;

/// Runs `CodeAction` requests against the host editor.
pub struct CodeActionPipeline {
    host: EditorHost,
    locks: WorkspaceLocks,
    polling: PollSettings,
}

impl CodeActionPipeline {
    /// Creates a pipeline over `host` with the given polling budget.
    #[must_use]
    pub fn new(host: EditorHost, polling: PollSettings) -> Self {
        Self {
            host,
            locks: WorkspaceLocks::default(),
            polling,
        }
    }

    /// Runs the full pipeline for `request`.
    ///
    /// A workspace mismatch and an empty poll are normal responses.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be found or opened, when the
    /// engine fails, or when the workspace lock is poisoned.
    pub fn run(&self, request: &CodeActionRequest) -> Result<BridgeResponse, DispatchError> {
        if let GuardOutcome::WrongWorkspace { prompt } =
            check_workspace(&self.host, request.root_path())
        {
            drop(prompt);
            return Ok(BridgeResponse::wrong_workspace());
        }

        let lock = self.locks.lock_for(request.root_path())?;
        let _held = lock
            .lock()
            .map_err(|_| DispatchError::internal("workspace lock poisoned"))?;

        let editor = &self.host.editor;
        let found = editor.find_file(request.file_path())?;
        let opened = editor.open_file(&found)?;
        editor.set_buffer(request.buffer())?;
        thread::sleep(self.polling.settle_delay);

        let position = request.position().to_zero_based();
        editor.set_selection(position)?;
        debug!(
            target: DISPATCH_TARGET,
            file = %opened,
            position = %request.position(),
            "polling for code actions"
        );

        let actions = poll_until_non_empty(self.polling.attempts, self.polling.interval, || {
            editor.query_code_actions(&opened, position)
        })?;
        if actions.is_empty() {
            return Ok(BridgeResponse::no_actions());
        }
        let shaped = shape_actions(&actions, || editor.document_text())?;
        Ok(BridgeResponse::code_actions(shaped))
    }
}
