//! Notification surface that writes to the log.

use tracing::{error, info, warn};

use super::{EDITOR_TARGET, HostUi};

/// Host UI for headless hosts: notices become log events and prompts are
/// answered from configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHostUi {
    accept_prompts: bool,
}

impl LoggingHostUi {
    /// Creates a UI that answers every prompt with `accept_prompts`.
    #[must_use]
    pub const fn new(accept_prompts: bool) -> Self {
        Self { accept_prompts }
    }
}

impl HostUi for LoggingHostUi {
    fn show_info(&self, message: &str) {
        info!(target: EDITOR_TARGET, notice = message, "notice");
    }

    fn show_error(&self, message: &str) {
        error!(target: EDITOR_TARGET, notice = message, "error notice");
    }

    fn prompt(&self, message: &str, action: &str) -> bool {
        warn!(
            target: EDITOR_TARGET,
            notice = message,
            action,
            accepted = self.accept_prompts,
            "prompt"
        );
        self.accept_prompts
    }
}
