//! Footer View Model
//!
//! Key hints for whatever currently receives key presses, or the command
//! line while it is open.

use crate::state::{AppState, Focus, UiMode, UiState};

/// A key and what it does, e.g. ("space", "toggle")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub keys: &'static str,
    pub description: &'static str,
}

const fn hint(keys: &'static str, description: &'static str) -> KeyHint {
    KeyHint { keys, description }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterViewModel {
    Hints(Vec<KeyHint>),
    /// Open command line, text without the leading ':'
    CommandLine(String),
}

impl FooterViewModel {
    pub fn from_state(state: &AppState, ui: &UiState) -> Self {
        if ui.focus == Focus::CommandLine {
            return Self::CommandLine(ui.command_line.clone());
        }

        let mode = state.ui_mode();
        let editing = match mode {
            UiMode::Homepage => state.editing.list.is_some(),
            UiMode::List => state.editing.todo.is_some(),
            UiMode::Loading => false,
        };

        let hints = if mode == UiMode::Loading {
            vec![hint("q", "quit")]
        } else if editing {
            vec![hint("Enter", "save"), hint("Esc", "cancel")]
        } else if ui.focus == Focus::NewEntry {
            vec![hint("Enter", "add"), hint("Esc", "close")]
        } else if mode == UiMode::List {
            vec![
                hint("j/k", "move"),
                hint("space", "toggle"),
                hint("a", "add"),
                hint("e", "edit"),
                hint("d", "delete"),
                hint("b/Esc", "back"),
                hint("t", "theme"),
                hint(":", "command"),
                hint("q", "quit"),
            ]
        } else {
            vec![
                hint("j/k", "move"),
                hint("Enter", "open"),
                hint("n", "new"),
                hint("e", "rename"),
                hint("d", "delete"),
                hint("t", "theme"),
                hint(":", "command"),
                hint("q", "quit"),
            ]
        };

        Self::Hints(hints)
    }
}
