//! Conversion of native code actions into the wire format.

use lsp_types::CodeAction;
use serde_json::Value;

use crate::dispatch::response::WireCodeAction;
use crate::editor::EditorError;

/// Command attached to the TypeScript engine's "fix all" action.
pub(crate) const APPLY_ALL_FIXES_COMMAND: &str = "_typescript.applyFixAllCodeAction";

/// How a native action can be expressed on the wire.
#[derive(Debug, PartialEq)]
enum ActionShape<'a> {
    /// Applies every fix; the client receives the whole fixed buffer.
    ApplyAll,
    /// Carries text changes at `arguments[0].changes[0].textChanges`.
    TextChanges(&'a [Value]),
    /// Neither of the above.
    Unsupported,
}

fn classify(action: &CodeAction) -> ActionShape<'_> {
    let Some(command) = action.command.as_ref() else {
        return ActionShape::Unsupported;
    };
    if command.command == APPLY_ALL_FIXES_COMMAND {
        return ActionShape::ApplyAll;
    }
    command
        .arguments
        .as_deref()
        .and_then(<[Value]>::first)
        .and_then(|argument| argument.get("changes"))
        .and_then(Value::as_array)
        .and_then(|changes| changes.first())
        .and_then(|change| change.get("textChanges"))
        .and_then(Value::as_array)
        .map_or(ActionShape::Unsupported, |changes| ActionShape::TextChanges(changes))
}

fn unsupported_title(action: &CodeAction) -> String {
    let command = action
        .command
        .as_ref()
        .map_or("apply", |attached| attached.command.as_str());
    format!("{} (Can't yet {command})", action.title)
}

/// Shapes `actions` in order.
///
/// `document_text` is consulted at most once, and only when an apply-all
/// action is present; every apply-all action carries the same text.
///
/// # Errors
///
/// Returns the error from `document_text` when the buffer cannot be read.
pub(crate) fn shape_actions<F>(
    actions: &[CodeAction],
    document_text: F,
) -> Result<Vec<WireCodeAction>, EditorError>
where
    F: FnOnce() -> Result<String, EditorError>,
{
    let shapes: Vec<_> = actions.iter().map(classify).collect();
    let buffer = if shapes.contains(&ActionShape::ApplyAll) {
        Some(document_text()?)
    } else {
        None
    };

    Ok(actions
        .iter()
        .zip(shapes)
        .map(|(action, shape)| match shape {
            ActionShape::ApplyAll => WireCodeAction {
                title: action.title.clone(),
                buffer: buffer.clone(),
                text_changes: Vec::new(),
            },
            ActionShape::TextChanges(changes) => {
                WireCodeAction::with_text_changes(action.title.clone(), changes.to_vec())
            }
            ActionShape::Unsupported => {
                WireCodeAction::with_text_changes(unsupported_title(action), Vec::new())
            }
        })
        .collect())
}
