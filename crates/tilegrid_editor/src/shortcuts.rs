//! Keyboard shortcut handling

/// A keyboard event as forwarded by the host binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub shift: bool,
    /// Whether a text input currently has focus; shortcuts must not fire
    /// while the user is typing
    pub in_text_input: bool,
}

/// An editor action requested via keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Undo,
    Redo,
}

/// Map a key event to an editor action.
///
/// Ctrl+Z undoes, Ctrl+Shift+Z redoes. Events from inside a focused text
/// input never map to anything.
pub fn action_for_key(event: KeyEvent<'_>) -> Option<EditorAction> {
    if event.in_text_input || !event.ctrl {
        return None;
    }
    if event.key.eq_ignore_ascii_case("z") {
        if event.shift {
            return Some(EditorAction::Redo);
        }
        return Some(EditorAction::Undo);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: &str, ctrl: bool, shift: bool) -> KeyEvent<'_> {
        KeyEvent {
            key,
            ctrl,
            shift,
            in_text_input: false,
        }
    }

    #[test]
    fn test_undo_redo_mapping() {
        assert_eq!(action_for_key(key("z", true, false)), Some(EditorAction::Undo));
        assert_eq!(action_for_key(key("z", true, true)), Some(EditorAction::Redo));
        assert_eq!(action_for_key(key("Z", true, true)), Some(EditorAction::Redo));
    }

    #[test]
    fn test_requires_ctrl() {
        assert_eq!(action_for_key(key("z", false, false)), None);
        assert_eq!(action_for_key(key("y", true, false)), None);
    }

    #[test]
    fn test_suppressed_in_text_input() {
        let event = KeyEvent {
            key: "z",
            ctrl: true,
            shift: false,
            in_text_input: true,
        };
        assert_eq!(action_for_key(event), None);
    }
}
