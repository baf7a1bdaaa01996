//! Scripted analysis engine for end-to-end scenarios.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use lsp_types::{CodeAction, Command, Range};
use serde_json::json;

use crate::editor::{CodeActionProvider, DocumentSnapshot, EditorError};

/// Answers with nothing for a configured number of calls, then with a fixed
/// list of actions.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    empty_answers: AtomicUsize,
    actions: Mutex<Vec<CodeAction>>,
    calls: AtomicUsize,
    last_range: Mutex<Option<Range>>,
}

impl ScriptedProvider {
    /// Offers `count` text-change actions after `empty_answers` empty ones.
    pub fn offer(&self, count: usize, empty_answers: usize) {
        let actions = (1..=count).map(text_change_action).collect();
        *self.actions.lock().expect("provider mutex poisoned") = actions;
        self.empty_answers.store(empty_answers, Ordering::SeqCst);
    }

    /// Number of times the engine was consulted.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Range of the most recent query.
    #[must_use]
    pub fn last_range(&self) -> Option<Range> {
        *self.last_range.lock().expect("provider mutex poisoned")
    }
}

fn text_change_action(index: usize) -> CodeAction {
    let argument = json!({
        "changes": [{
            "fileName": "main.ts",
            "textChanges": [{
                "start": { "line": 1, "offset": 1 },
                "end": { "line": 1, "offset": 1 },
                "newText": format!("// fix {index}\n"),
            }],
        }],
    });
    CodeAction {
        title: format!("Fix {index}"),
        command: Some(Command::new(
            format!("Fix {index}"),
            "_typescript.applyCodeActionCommand".to_owned(),
            Some(vec![argument]),
        )),
        ..CodeAction::default()
    }
}

impl CodeActionProvider for ScriptedProvider {
    fn code_actions(
        &self,
        _document: &DocumentSnapshot,
        range: Range,
    ) -> Result<Vec<CodeAction>, EditorError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_range.lock().expect("provider mutex poisoned") = Some(range);
        if call < self.empty_answers.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        Ok(self.actions.lock().expect("provider mutex poisoned").clone())
    }
}
