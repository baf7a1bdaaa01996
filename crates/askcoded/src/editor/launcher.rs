//! Workspace switching through the host editor's command-line launcher.

use std::process::{Command, Output, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use camino::Utf8Path;
use tracing::{info, warn};

use super::{EDITOR_TARGET, HostUi, WorkspaceSwitcher};

/// Reopens the IDE by running `<command> -r <path>` (or `-n` for a new
/// window) in the background.
pub struct EditorCliLauncher {
    command: String,
    ui: Arc<dyn HostUi>,
}

impl EditorCliLauncher {
    /// Creates a launcher for `command`, reporting failures through `ui`.
    #[must_use]
    pub fn new(command: impl Into<String>, ui: Arc<dyn HostUi>) -> Self {
        Self {
            command: command.into(),
            ui,
        }
    }

    /// Spawns the launcher process on a background thread.
    #[must_use]
    pub fn launch(&self, path: &Utf8Path, new_window: bool) -> JoinHandle<()> {
        let command = self.command.clone();
        let ui = Arc::clone(&self.ui);
        let target = path.to_path_buf();
        thread::spawn(move || run_launcher(&command, &target, new_window, ui.as_ref()))
    }
}

impl WorkspaceSwitcher for EditorCliLauncher {
    fn switch_workspace(&self, path: &Utf8Path, new_window: bool) {
        drop(self.launch(path, new_window));
    }
}

const fn window_flag(new_window: bool) -> &'static str {
    if new_window { "-n" } else { "-r" }
}

fn run_launcher(command: &str, path: &Utf8Path, new_window: bool, ui: &dyn HostUi) {
    info!(
        target: EDITOR_TARGET,
        command,
        path = %path,
        new_window,
        "switching workspace"
    );
    let failure = Command::new(command)
        .arg(window_flag(new_window))
        .arg(path.as_str())
        .stdin(Stdio::null())
        .output()
        .map_or_else(
            |error| Some(format!("failed to run {command}: {error}")),
            |output| launch_failure(&output),
        );
    if let Some(message) = failure {
        warn!(
            target: EDITOR_TARGET,
            command,
            reason = %message,
            "workspace switch failed"
        );
        ui.show_error(&message);
    }
}

fn launch_failure(output: &Output) -> Option<String> {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = stderr.trim();
    if !message.is_empty() {
        return Some(message.to_owned());
    }
    if output.status.success() {
        None
    } else {
        Some(format!("editor launcher exited with {}", output.status))
    }
}
