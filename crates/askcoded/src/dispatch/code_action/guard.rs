//! Workspace correctness check run before any editor state is touched.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use camino::Utf8Path;
use tracing::info;

use crate::dispatch::router::DISPATCH_TARGET;
use crate::editor::EditorHost;

/// Prompt shown when a request targets a workspace that is not open.
pub(crate) const WRONG_WORKSPACE_PROMPT: &str = "Please change to correct workspace";
/// Label of the prompt's single action.
pub(crate) const SWITCH_WORKSPACE_ACTION: &str = "Switch workspace";

/// Result of comparing a request root with the open workspace.
#[derive(Debug)]
pub(crate) enum GuardOutcome {
    /// Roots match; the pipeline may run.
    Proceed,
    /// Roots differ. The user is being prompted on `prompt`; the response
    /// must not wait for it.
    WrongWorkspace { prompt: JoinHandle<()> },
}

/// Strips trailing separators, keeping a lone root separator intact.
pub(crate) fn normalize_root(root: &str) -> &str {
    let trimmed = root.trim_end_matches(['/', std::path::MAIN_SEPARATOR]);
    if trimmed.is_empty() {
        root.get(..1).unwrap_or(trimmed)
    } else {
        trimmed
    }
}

/// Compares `requested` with the open workspace root.
///
/// A host with no open workspace never matches. On mismatch the switch prompt
/// runs on its own thread and, if accepted, reopens the IDE on `requested`.
pub(crate) fn check_workspace(host: &EditorHost, requested: &Utf8Path) -> GuardOutcome {
    let open = host.editor.workspace_root();
    let matches = open
        .as_deref()
        .is_some_and(|current| normalize_root(current.as_str()) == normalize_root(requested.as_str()));
    if matches {
        return GuardOutcome::Proceed;
    }

    info!(
        target: DISPATCH_TARGET,
        requested = %requested,
        open = open.as_ref().map_or("<none>", |root| root.as_str()),
        "request targets another workspace"
    );
    let ui = Arc::clone(&host.ui);
    let switcher = Arc::clone(&host.switcher);
    let target = requested.to_path_buf();
    let prompt = thread::spawn(move || {
        if ui.prompt(WRONG_WORKSPACE_PROMPT, SWITCH_WORKSPACE_ACTION) {
            switcher.switch_workspace(&target, false);
        }
    });
    GuardOutcome::WrongWorkspace { prompt }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use mockall::predicate::eq;
    use rstest::rstest;

    use crate::editor::{MockEditorBridge, MockHostUi, MockWorkspaceSwitcher};

    use super::*;

    fn host(
        open: Option<&str>,
        ui: MockHostUi,
        switcher: MockWorkspaceSwitcher,
    ) -> EditorHost {
        let root = open.map(Utf8PathBuf::from);
        let mut editor = MockEditorBridge::new();
        editor
            .expect_workspace_root()
            .returning(move || root.clone());
        EditorHost::new(Arc::new(editor), Arc::new(switcher), Arc::new(ui))
    }

    #[rstest]
    #[case::identical("/tmp/proj", "/tmp/proj")]
    #[case::trailing_request("/tmp/proj", "/tmp/proj/")]
    #[case::trailing_open("/tmp/proj/", "/tmp/proj")]
    fn matching_roots_proceed(#[case] open: &str, #[case] requested: &str) {
        let outcome = check_workspace(
            &host(Some(open), MockHostUi::new(), MockWorkspaceSwitcher::new()),
            Utf8Path::new(requested),
        );
        assert!(matches!(outcome, GuardOutcome::Proceed));
    }

    #[test]
    fn accepted_prompt_switches_in_the_same_window() {
        let mut ui = MockHostUi::new();
        ui.expect_prompt()
            .with(eq(WRONG_WORKSPACE_PROMPT), eq(SWITCH_WORKSPACE_ACTION))
            .times(1)
            .return_const(true);
        let mut switcher = MockWorkspaceSwitcher::new();
        switcher
            .expect_switch_workspace()
            .withf(|path, new_window| path.as_str() == "/tmp/other" && !*new_window)
            .times(1)
            .return_const(());

        let outcome = check_workspace(
            &host(Some("/tmp/proj"), ui, switcher),
            Utf8Path::new("/tmp/other"),
        );
        let GuardOutcome::WrongWorkspace { prompt } = outcome else {
            panic!("expected a workspace mismatch");
        };
        prompt.join().expect("prompt thread");
    }

    #[test]
    fn declined_prompt_does_not_switch() {
        let mut ui = MockHostUi::new();
        ui.expect_prompt().times(1).return_const(false);
        let mut switcher = MockWorkspaceSwitcher::new();
        switcher.expect_switch_workspace().never();

        let outcome = check_workspace(
            &host(Some("/tmp/proj"), ui, switcher),
            Utf8Path::new("/tmp/other"),
        );
        let GuardOutcome::WrongWorkspace { prompt } = outcome else {
            panic!("expected a workspace mismatch");
        };
        prompt.join().expect("prompt thread");
    }

    #[test]
    fn missing_workspace_is_a_mismatch() {
        let mut ui = MockHostUi::new();
        ui.expect_prompt().return_const(false);

        let outcome = check_workspace(
            &host(None, ui, MockWorkspaceSwitcher::new()),
            Utf8Path::new("/tmp/proj"),
        );
        let GuardOutcome::WrongWorkspace { prompt } = outcome else {
            panic!("expected a workspace mismatch");
        };
        prompt.join().expect("prompt thread");
    }

    #[rstest]
    #[case::plain("/tmp/proj", "/tmp/proj")]
    #[case::one_trailing("/tmp/proj/", "/tmp/proj")]
    #[case::many_trailing("/tmp/proj///", "/tmp/proj")]
    #[case::filesystem_root("/", "/")]
    #[case::empty("", "")]
    fn normalizes_roots(#[case] root: &str, #[case] expected: &str) {
        assert_eq!(normalize_root(root), expected);
    }
}
