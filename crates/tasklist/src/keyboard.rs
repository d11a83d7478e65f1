//! Keyboard handling - translates key events into commands
//!
//! Routing happens in layers:
//! 1. Priority keys (Ctrl+C quits, Ctrl+S retries a failed save)
//! 2. Focused text inputs (command line, in-place edit, new entry)
//! 3. Screen bindings for the homepage or the list detail screen
//!
//! Only UI-local state (`UiState`) is changed here. Anything that touches
//! application data is returned as an `Action` for the dispatcher.

use crate::actions::Action;
use crate::domain_models::{ListId, TodoId, TodoRef};
use crate::state::{AppState, EditTarget, Focus, UiMode, UiState};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the app loop should do with a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCommand {
    /// Handled locally (or ignored)
    None,
    Quit,
    Dispatch(Action),
    /// Submission of the "new list" / "new todo" input; the input is cleared
    /// only if the dispatch succeeds
    SubmitNewEntry(Action),
    /// A `:` command line, without the colon
    RunCommandLine(String),
    RetryPersist,
}

/// Active in-place edit for the visible screen
enum ActiveEdit {
    List(ListId),
    Todo(TodoId),
}

pub fn handle_key(key: KeyEvent, state: &AppState, ui: &mut UiState) -> KeyCommand {
    // Layer 1: priority keys
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyCommand::Quit,
            KeyCode::Char('s') => KeyCommand::RetryPersist,
            _ => KeyCommand::None,
        };
    }

    let mode = state.ui_mode();
    if mode == UiMode::Loading {
        return match key.code {
            KeyCode::Char('q') => KeyCommand::Quit,
            _ => KeyCommand::None,
        };
    }

    // Layer 2: focused inputs
    if ui.focus == Focus::CommandLine {
        return handle_command_line(key, ui);
    }
    if let Some(edit) = active_edit(state, mode) {
        return handle_edit(key, edit, ui);
    }
    if ui.focus == Focus::NewEntry {
        return handle_new_entry(key, mode, ui);
    }

    // Layer 3: screen bindings
    match key.code {
        KeyCode::Char('q') => return KeyCommand::Quit,
        KeyCode::Char('t') => {
            return KeyCommand::Dispatch(Action::ChangeTheme {
                theme: state.theme.toggled(),
            })
        }
        KeyCode::Char(':') => {
            ui.command_line.clear();
            ui.focus = Focus::CommandLine;
            return KeyCommand::None;
        }
        KeyCode::Char('a') | KeyCode::Char('n') => {
            ui.new_entry.clear();
            ui.focus = Focus::NewEntry;
            return KeyCommand::None;
        }
        _ => {}
    }

    match mode {
        UiMode::Homepage => handle_homepage(key, state, ui),
        UiMode::List => handle_list(key, state, ui),
        UiMode::Loading => KeyCommand::None,
    }
}

/// The edit relevant to the visible screen: list edits on the homepage,
/// todo edits in the list detail screen
fn active_edit(state: &AppState, mode: UiMode) -> Option<ActiveEdit> {
    match mode {
        UiMode::Homepage => state
            .editing
            .list
            .as_ref()
            .filter(|id| state.list(id).is_some())
            .map(|id| ActiveEdit::List(id.clone())),
        UiMode::List => {
            let id = state.editing.todo.as_ref()?;
            state
                .selected_list()?
                .todos
                .iter()
                .any(|t| &t.id == id)
                .then(|| ActiveEdit::Todo(id.clone()))
        }
        UiMode::Loading => None,
    }
}

fn handle_command_line(key: KeyEvent, ui: &mut UiState) -> KeyCommand {
    match key.code {
        KeyCode::Esc => {
            ui.command_line.clear();
            ui.focus = Focus::Items;
            KeyCommand::None
        }
        KeyCode::Enter => {
            ui.focus = Focus::Items;
            let line = std::mem::take(&mut ui.command_line);
            if line.trim().is_empty() {
                KeyCommand::None
            } else {
                KeyCommand::RunCommandLine(line)
            }
        }
        KeyCode::Backspace => {
            ui.command_line.pop();
            KeyCommand::None
        }
        KeyCode::Char(c) => {
            ui.command_line.push(c);
            KeyCommand::None
        }
        _ => KeyCommand::None,
    }
}

fn handle_edit(key: KeyEvent, edit: ActiveEdit, ui: &mut UiState) -> KeyCommand {
    match key.code {
        KeyCode::Esc => KeyCommand::Dispatch(Action::CancelEditing),
        KeyCode::Enter => {
            // Saving an empty value leaves edit mode without committing
            if ui.edit_buffer.trim().is_empty() {
                return KeyCommand::Dispatch(Action::CancelEditing);
            }
            let value = ui.edit_buffer.clone();
            let action = match edit {
                ActiveEdit::List(id) => Action::EditList {
                    id,
                    new_name: value,
                },
                ActiveEdit::Todo(id) => Action::EditTodo {
                    todo: TodoRef::Id(id),
                    new_text: value,
                },
            };
            KeyCommand::Dispatch(action)
        }
        KeyCode::Backspace => {
            ui.edit_buffer.pop();
            KeyCommand::None
        }
        KeyCode::Char(c) => {
            ui.edit_buffer.push(c);
            KeyCommand::None
        }
        _ => KeyCommand::None,
    }
}

fn handle_new_entry(key: KeyEvent, mode: UiMode, ui: &mut UiState) -> KeyCommand {
    match key.code {
        KeyCode::Esc => {
            ui.new_entry.clear();
            ui.focus = Focus::Items;
            KeyCommand::None
        }
        KeyCode::Enter => {
            let value = ui.new_entry.trim();
            if value.is_empty() {
                return KeyCommand::None;
            }
            let action = match mode {
                UiMode::List => Action::AddTodo {
                    text: value.to_string(),
                },
                _ => Action::AddList {
                    name: value.to_string(),
                },
            };
            KeyCommand::SubmitNewEntry(action)
        }
        KeyCode::Backspace => {
            ui.new_entry.pop();
            KeyCommand::None
        }
        KeyCode::Char(c) => {
            ui.new_entry.push(c);
            KeyCommand::None
        }
        _ => KeyCommand::None,
    }
}

fn handle_homepage(key: KeyEvent, state: &AppState, ui: &mut UiState) -> KeyCommand {
    let len = state.lists.len();
    let current = state.lists.get(ui.home_cursor).map(|l| l.id.clone());

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            ui.home_cursor = next(ui.home_cursor, len);
            KeyCommand::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            ui.home_cursor = ui.home_cursor.saturating_sub(1);
            KeyCommand::None
        }
        KeyCode::Enter => current
            .map(|id| KeyCommand::Dispatch(Action::SelectList { id }))
            .unwrap_or(KeyCommand::None),
        KeyCode::Char('e') => current
            .map(|id| {
                KeyCommand::Dispatch(Action::BeginEditing {
                    target: EditTarget::List(id),
                })
            })
            .unwrap_or(KeyCommand::None),
        KeyCode::Char('d') => current
            .map(|id| KeyCommand::Dispatch(Action::DeleteList { id }))
            .unwrap_or(KeyCommand::None),
        _ => KeyCommand::None,
    }
}

fn handle_list(key: KeyEvent, state: &AppState, ui: &mut UiState) -> KeyCommand {
    let todos = state
        .selected_list()
        .map(|l| l.todos.as_slice())
        .unwrap_or_default();
    let current = todos.get(ui.list_cursor);

    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => KeyCommand::Dispatch(Action::BackHome),
        KeyCode::Down | KeyCode::Char('j') => {
            ui.list_cursor = next(ui.list_cursor, todos.len());
            KeyCommand::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            ui.list_cursor = ui.list_cursor.saturating_sub(1);
            KeyCommand::None
        }
        KeyCode::Char(' ') => current
            .map(|todo| {
                KeyCommand::Dispatch(Action::ToggleTodo {
                    todo: TodoRef::Id(todo.id.clone()),
                    completed: !todo.completed,
                })
            })
            .unwrap_or(KeyCommand::None),
        KeyCode::Char('e') => current
            .map(|todo| {
                KeyCommand::Dispatch(Action::BeginEditing {
                    target: EditTarget::Todo(TodoRef::Id(todo.id.clone())),
                })
            })
            .unwrap_or(KeyCommand::None),
        KeyCode::Char('d') => current
            .map(|todo| {
                KeyCommand::Dispatch(Action::DeleteTodo {
                    todo: TodoRef::Id(todo.id.clone()),
                })
            })
            .unwrap_or(KeyCommand::None),
        _ => KeyCommand::None,
    }
}

fn next(cursor: usize, len: usize) -> usize {
    if cursor + 1 < len {
        cursor + 1
    } else {
        cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::{ThemeName, Todo, TodoList};
    use pretty_assertions::assert_eq;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn homepage_with(names: &[&str]) -> AppState {
        AppState {
            lists: names.iter().map(|n| TodoList::new(*n)).collect(),
            loading: false,
            ..AppState::default()
        }
    }

    fn list_screen(todos: &[&str]) -> AppState {
        let mut list = TodoList::new("Groceries");
        list.todos = todos.iter().map(|t| Todo::new(*t)).collect();
        AppState {
            selected_list_id: Some(list.id.clone()),
            lists: vec![list],
            loading: false,
            ..AppState::default()
        }
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut ui = UiState {
            focus: Focus::CommandLine,
            ..UiState::default()
        };
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(key, &AppState::default(), &mut ui), KeyCommand::Quit);
    }

    #[test]
    fn test_loading_screen_ignores_bindings() {
        let mut ui = UiState::default();
        let state = AppState::default();
        assert_eq!(
            handle_key(press(KeyCode::Char('t')), &state, &mut ui),
            KeyCommand::None
        );
    }

    #[test]
    fn test_new_list_submission_requires_text() {
        let state = homepage_with(&[]);
        let mut ui = UiState::default();

        handle_key(press(KeyCode::Char('n')), &state, &mut ui);
        assert_eq!(ui.focus, Focus::NewEntry);
        assert_eq!(
            handle_key(press(KeyCode::Enter), &state, &mut ui),
            KeyCommand::None
        );

        for c in " Work ".chars() {
            handle_key(press(KeyCode::Char(c)), &state, &mut ui);
        }
        assert_eq!(
            handle_key(press(KeyCode::Enter), &state, &mut ui),
            KeyCommand::SubmitNewEntry(Action::AddList {
                name: "Work".to_string()
            })
        );
        // Cleared by the app once the list exists, not here.
        assert_eq!(ui.new_entry, " Work ");
    }

    #[test]
    fn test_homepage_bindings_target_cursor_row() {
        let state = homepage_with(&["A", "B"]);
        let second = state.lists[1].id.clone();
        let mut ui = UiState::default();

        handle_key(press(KeyCode::Down), &state, &mut ui);
        handle_key(press(KeyCode::Down), &state, &mut ui);
        assert_eq!(ui.home_cursor, 1);

        assert_eq!(
            handle_key(press(KeyCode::Enter), &state, &mut ui),
            KeyCommand::Dispatch(Action::SelectList { id: second.clone() })
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('e')), &state, &mut ui),
            KeyCommand::Dispatch(Action::BeginEditing {
                target: EditTarget::List(second.clone())
            })
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('d')), &state, &mut ui),
            KeyCommand::Dispatch(Action::DeleteList { id: second })
        );
    }

    #[test]
    fn test_list_screen_bindings() {
        let state = list_screen(&["Milk", "Eggs"]);
        let milk = state.lists[0].todos[0].id.clone();
        let mut ui = UiState::default();

        assert_eq!(
            handle_key(press(KeyCode::Char(' ')), &state, &mut ui),
            KeyCommand::Dispatch(Action::ToggleTodo {
                todo: TodoRef::Id(milk.clone()),
                completed: true
            })
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('d')), &state, &mut ui),
            KeyCommand::Dispatch(Action::DeleteTodo {
                todo: TodoRef::Id(milk)
            })
        );
        assert_eq!(
            handle_key(press(KeyCode::Esc), &state, &mut ui),
            KeyCommand::Dispatch(Action::BackHome)
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('b')), &state, &mut ui),
            KeyCommand::Dispatch(Action::BackHome)
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('t')), &state, &mut ui),
            KeyCommand::Dispatch(Action::ChangeTheme {
                theme: ThemeName::Light
            })
        );
    }

    #[test]
    fn test_saving_empty_edit_cancels() {
        let mut state = list_screen(&["Milk"]);
        let milk = state.lists[0].todos[0].id.clone();
        state.editing.todo = Some(milk.clone());
        let mut ui = UiState {
            edit_buffer: "   ".to_string(),
            ..UiState::default()
        };

        assert_eq!(
            handle_key(press(KeyCode::Enter), &state, &mut ui),
            KeyCommand::Dispatch(Action::CancelEditing)
        );

        ui.edit_buffer = "Oat milk".to_string();
        assert_eq!(
            handle_key(press(KeyCode::Enter), &state, &mut ui),
            KeyCommand::Dispatch(Action::EditTodo {
                todo: TodoRef::Id(milk),
                new_text: "Oat milk".to_string()
            })
        );
    }

    #[test]
    fn test_edit_mode_captures_typing() {
        let mut state = homepage_with(&["A"]);
        state.editing.list = Some(state.lists[0].id.clone());
        let mut ui = UiState {
            edit_buffer: "A".to_string(),
            ..UiState::default()
        };

        // 'd' is text while editing, not delete
        assert_eq!(
            handle_key(press(KeyCode::Char('d')), &state, &mut ui),
            KeyCommand::None
        );
        assert_eq!(ui.edit_buffer, "Ad");
        assert_eq!(
            handle_key(press(KeyCode::Esc), &state, &mut ui),
            KeyCommand::Dispatch(Action::CancelEditing)
        );
    }

    #[test]
    fn test_command_line() {
        let state = homepage_with(&[]);
        let mut ui = UiState::default();

        handle_key(press(KeyCode::Char(':')), &state, &mut ui);
        assert_eq!(ui.focus, Focus::CommandLine);
        for c in "BACK_HOME".chars() {
            handle_key(press(KeyCode::Char(c)), &state, &mut ui);
        }
        assert_eq!(
            handle_key(press(KeyCode::Enter), &state, &mut ui),
            KeyCommand::RunCommandLine("BACK_HOME".to_string())
        );
        assert_eq!(ui.focus, Focus::Items);
        assert!(ui.command_line.is_empty());
    }
}
