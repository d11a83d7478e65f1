//! Homepage View Model
//!
//! The "new list" input and one row per list with its todo counts.

use super::InputViewModel;
use crate::state::{AppState, Focus, UiState};
use ratatui::style::Style;

/// One list on the homepage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRowViewModel {
    /// Name, or the edit buffer while this row is being edited
    pub text: String,
    /// e.g. "2/3 done"
    pub summary: String,
    pub is_cursor: bool,
    pub is_editing: bool,
    pub style: Style,
    pub summary_style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomepageViewModel {
    pub title: String,
    pub input: InputViewModel,
    /// Shown instead of rows when there are no lists
    pub empty_message: Option<&'static str>,
    pub rows: Vec<ListRowViewModel>,
    /// Row the view keeps on screen: the one being edited, else the cursor
    pub cursor_row: usize,
}

impl HomepageViewModel {
    pub fn from_state(state: &AppState, ui: &UiState) -> Self {
        let theme = state.theme.palette();
        let focus_on_rows = ui.focus == Focus::Items;

        let rows = state
            .lists
            .iter()
            .enumerate()
            .map(|(index, list)| {
                let is_cursor = focus_on_rows && index == ui.home_cursor;
                let is_editing = state.editing.is_editing_list(&list.id);
                let text = if is_editing {
                    format!("{}▏", ui.edit_buffer)
                } else {
                    list.name.clone()
                };
                let style = if is_editing {
                    theme.input_focused()
                } else if is_cursor {
                    theme.row_selected()
                } else {
                    theme.row()
                };

                ListRowViewModel {
                    text,
                    summary: format!("{}/{} done", list.completed_count(), list.todos.len()),
                    is_cursor,
                    is_editing,
                    style,
                    summary_style: theme.muted(),
                }
            })
            .collect::<Vec<_>>();
        let cursor_row = rows
            .iter()
            .position(|row| row.is_editing)
            .unwrap_or(ui.home_cursor);

        Self {
            title: format!(" Lists ({}) ", state.lists.len()),
            input: InputViewModel::new(
                "New list",
                "press n to add a list",
                &ui.new_entry,
                ui.focus == Focus::NewEntry,
                &theme,
            ),
            empty_message: rows.is_empty().then_some("No lists yet. Create one to get started."),
            rows,
            cursor_row,
        }
    }
}
