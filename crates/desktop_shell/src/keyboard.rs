//! Desktop-root keyboard surface: pure key-event translation, separate from dispatch.

use crate::selection::StepDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Shell-level command bound at the desktop root.
pub enum ShellCommand {
    /// Select every desktop icon.
    SelectAll,
    /// Close the focused window.
    CloseFocusedWindow,
    /// Reload the desktop tree.
    Refresh,
    /// Toggle quick-look for the primary selection.
    ToggleQuickLook,
    /// Open the primary selection.
    OpenSelection,
    /// Move the selection to the trash.
    TrashSelection,
    /// Step the selection through the sorted icon order.
    StepSelection(StepDirection),
    /// Close quick-look if open, otherwise clear the selection.
    Escape,
}

/// Translates a key event into a [`ShellCommand`]. `primary_modifier` is Meta on macOS-style
/// hosts and Control elsewhere; the view layer resolves which before calling.
pub fn command_for_key(key: &str, primary_modifier: bool) -> Option<ShellCommand> {
    match (primary_modifier, key) {
        (true, "a" | "A") => Some(ShellCommand::SelectAll),
        (true, "w" | "W") => Some(ShellCommand::CloseFocusedWindow),
        (true, "r" | "R") => Some(ShellCommand::Refresh),
        (true, "Backspace") => Some(ShellCommand::TrashSelection),
        (false, " ") => Some(ShellCommand::ToggleQuickLook),
        (false, "Enter") => Some(ShellCommand::OpenSelection),
        (false, "Delete") => Some(ShellCommand::TrashSelection),
        (false, "ArrowRight" | "ArrowDown") => {
            Some(ShellCommand::StepSelection(StepDirection::Next))
        }
        (false, "ArrowLeft" | "ArrowUp") => {
            Some(ShellCommand::StepSelection(StepDirection::Previous))
        }
        (false, "Escape") => Some(ShellCommand::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_the_bound_shortcut_set() {
        let cases = [
            ("a", true, Some(ShellCommand::SelectAll)),
            ("w", true, Some(ShellCommand::CloseFocusedWindow)),
            ("r", true, Some(ShellCommand::Refresh)),
            (" ", false, Some(ShellCommand::ToggleQuickLook)),
            ("Enter", false, Some(ShellCommand::OpenSelection)),
            ("Delete", false, Some(ShellCommand::TrashSelection)),
            ("Backspace", true, Some(ShellCommand::TrashSelection)),
            (
                "ArrowDown",
                false,
                Some(ShellCommand::StepSelection(StepDirection::Next)),
            ),
            (
                "ArrowLeft",
                false,
                Some(ShellCommand::StepSelection(StepDirection::Previous)),
            ),
            ("Escape", false, Some(ShellCommand::Escape)),
            ("x", false, None),
            ("Enter", true, None),
        ];

        for (key, modifier, expected) in cases {
            assert_eq!(
                command_for_key(key, modifier),
                expected,
                "key={key:?} modifier={modifier}"
            );
        }
    }
}
