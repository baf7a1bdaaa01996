//! Host UI and workspace switcher doubles that remember what they were asked.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use camino::{Utf8Path, Utf8PathBuf};

use crate::editor::{HostUi, WorkspaceSwitcher};

/// Records notices and answers prompts with a fixed choice.
#[derive(Debug, Default)]
pub struct RecordingUi {
    infos: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
    accept_prompts: AtomicBool,
}

impl RecordingUi {
    /// Makes every later prompt return `accept`.
    pub fn answer_prompts(&self, accept: bool) {
        self.accept_prompts.store(accept, Ordering::SeqCst);
    }

    /// Informational notices shown so far.
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().expect("ui mutex poisoned").clone()
    }

    /// Error notices shown so far.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("ui mutex poisoned").clone()
    }

    /// Prompt messages shown so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("ui mutex poisoned").clone()
    }
}

impl HostUi for RecordingUi {
    fn show_info(&self, message: &str) {
        self.infos
            .lock()
            .expect("ui mutex poisoned")
            .push(message.to_owned());
    }

    fn show_error(&self, message: &str) {
        self.errors
            .lock()
            .expect("ui mutex poisoned")
            .push(message.to_owned());
    }

    fn prompt(&self, message: &str, _action: &str) -> bool {
        self.prompts
            .lock()
            .expect("ui mutex poisoned")
            .push(message.to_owned());
        self.accept_prompts.load(Ordering::SeqCst)
    }
}

/// Remembers every switch request instead of launching an editor.
#[derive(Debug, Default)]
pub struct RecordingSwitcher {
    switches: Mutex<Vec<(Utf8PathBuf, bool)>>,
}

impl RecordingSwitcher {
    /// Requested `(root, new_window)` pairs in order.
    #[must_use]
    pub fn switches(&self) -> Vec<(Utf8PathBuf, bool)> {
        self.switches.lock().expect("switcher mutex poisoned").clone()
    }
}

impl WorkspaceSwitcher for RecordingSwitcher {
    fn switch_workspace(&self, path: &Utf8Path, new_window: bool) {
        self.switches
            .lock()
            .expect("switcher mutex poisoned")
            .push((path.to_path_buf(), new_window));
    }
}
