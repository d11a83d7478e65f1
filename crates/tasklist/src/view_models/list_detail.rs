//! List Detail View Model

use super::InputViewModel;
use crate::state::{AppState, Focus, UiState};
use ratatui::style::Style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRowViewModel {
    /// "[x]" or "[ ]"
    pub checkbox: &'static str,
    /// Text, or the edit buffer while this row is being edited
    pub text: String,
    pub is_cursor: bool,
    pub is_editing: bool,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDetailViewModel {
    pub title: String,
    /// e.g. "1/3 done"
    pub progress: String,
    pub input: InputViewModel,
    pub empty_message: Option<&'static str>,
    pub rows: Vec<TodoRowViewModel>,
    /// Row the view keeps on screen
    pub cursor_row: usize,
}

impl ListDetailViewModel {
    /// `None` when no list is selected
    pub fn from_state(state: &AppState, ui: &UiState) -> Option<Self> {
        let list = state.selected_list()?;
        let theme = state.theme.palette();
        let focus_on_rows = ui.focus == Focus::Items;

        let rows = list
            .todos
            .iter()
            .enumerate()
            .map(|(index, todo)| {
                let is_cursor = focus_on_rows && index == ui.list_cursor;
                let is_editing = state.editing.is_editing_todo(&todo.id);
                let style = if is_editing {
                    theme.input_focused()
                } else if is_cursor {
                    theme.row_selected()
                } else if todo.completed {
                    theme.row_done()
                } else {
                    theme.row()
                };

                TodoRowViewModel {
                    checkbox: if todo.completed { "[x]" } else { "[ ]" },
                    text: if is_editing {
                        format!("{}▏", ui.edit_buffer)
                    } else {
                        todo.text.clone()
                    },
                    is_cursor,
                    is_editing,
                    style,
                }
            })
            .collect::<Vec<_>>();
        let cursor_row = rows
            .iter()
            .position(|row| row.is_editing)
            .unwrap_or(ui.list_cursor);

        Some(Self {
            title: format!(" {} ", list.name),
            progress: format!("{}/{} done", list.completed_count(), list.todos.len()),
            input: InputViewModel::new(
                "New todo",
                "press a to add a todo",
                &ui.new_entry,
                ui.focus == Focus::NewEntry,
                &theme,
            ),
            empty_message: rows.is_empty().then_some("Nothing to do here yet."),
            rows,
            cursor_row,
        })
    }
}
