//! Application State
//!
//! The mutation methods here are only reachable through `Store`, which
//! persists and notifies after each successful call. Every method validates
//! and looks up before touching anything, so an `Err` always means the state
//! is unchanged.

use super::{EditTarget, EditingState};
use crate::domain_models::{ListId, ThemeName, Todo, TodoId, TodoList, TodoRef};
use crate::error::{StoreError, StoreResult, ValidationError};

/// Which top-level screen is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Loading,
    Homepage,
    List,
}

/// Root aggregate: lists, selection, theme and transient view flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Lists in insertion order
    pub lists: Vec<TodoList>,
    pub selected_list_id: Option<ListId>,
    pub theme: ThemeName,
    /// True until the startup phase ends
    pub loading: bool,
    /// Never persisted
    pub editing: EditingState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            lists: Vec::new(),
            selected_list_id: None,
            theme: ThemeName::Dark,
            loading: true,
            editing: EditingState::default(),
        }
    }
}

impl AppState {
    /// Screen derived from the loading phase and the selection
    ///
    /// A selection pointing at a list that no longer exists shows the homepage.
    pub fn ui_mode(&self) -> UiMode {
        if self.loading {
            UiMode::Loading
        } else if self.selected_list().is_some() {
            UiMode::List
        } else {
            UiMode::Homepage
        }
    }

    pub fn list(&self, id: &ListId) -> Option<&TodoList> {
        self.lists.iter().find(|l| &l.id == id)
    }

    pub fn selected_list(&self) -> Option<&TodoList> {
        self.selected_list_id.as_ref().and_then(|id| self.list(id))
    }

    fn list_mut(&mut self, id: &ListId) -> StoreResult<&mut TodoList> {
        self.lists
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| StoreError::ListNotFound(id.clone()))
    }

    fn selected_list_mut(&mut self) -> StoreResult<&mut TodoList> {
        let id = self
            .selected_list_id
            .clone()
            .ok_or(StoreError::NoListSelected)?;
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::NoListSelected)
    }

    /// Locate a todo in the selected list: (position, todo)
    fn selected_todo_mut(&mut self, todo: &TodoRef) -> StoreResult<(usize, &mut Todo)> {
        let list = self.selected_list_mut()?;
        let index = list
            .position(todo)
            .ok_or_else(|| StoreError::TodoNotFound(todo.clone()))?;
        Ok((index, &mut list.todos[index]))
    }

    pub(crate) fn add_list(&mut self, name: &str) -> StoreResult<ListId> {
        let name = non_empty(name, ValidationError::EmptyName)?;
        let list = TodoList::new(name);
        let id = list.id.clone();
        self.lists.push(list);
        self.select(Some(id.clone()));
        Ok(id)
    }

    pub(crate) fn select_list(&mut self, id: &ListId) -> StoreResult<()> {
        if self.list(id).is_none() {
            return Err(StoreError::ListNotFound(id.clone()));
        }
        self.select(Some(id.clone()));
        Ok(())
    }

    pub(crate) fn edit_list_name(&mut self, id: &ListId, new_name: &str) -> StoreResult<()> {
        let new_name = non_empty(new_name, ValidationError::EmptyName)?;
        self.list_mut(id)?.name = new_name.to_string();
        if self.editing.is_editing_list(id) {
            self.editing.list = None;
        }
        Ok(())
    }

    pub(crate) fn delete_list(&mut self, id: &ListId) -> StoreResult<TodoList> {
        let index = self
            .lists
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| StoreError::ListNotFound(id.clone()))?;
        let removed = self.lists.remove(index);
        if self.selected_list_id.as_ref() == Some(id) {
            self.select(None);
        }
        if self.editing.is_editing_list(id) {
            self.editing.list = None;
        }
        Ok(removed)
    }

    pub(crate) fn add_todo(&mut self, text: &str) -> StoreResult<TodoId> {
        let text = non_empty(text, ValidationError::EmptyText)?;
        let list = self.selected_list_mut()?;
        let todo = Todo::new(text);
        let id = todo.id.clone();
        list.todos.push(todo);
        Ok(id)
    }

    pub(crate) fn delete_todo(&mut self, todo: &TodoRef) -> StoreResult<(usize, Todo)> {
        let (index, _) = self.selected_todo_mut(todo)?;
        let removed = self.selected_list_mut()?.todos.remove(index);
        if self.editing.is_editing_todo(&removed.id) {
            self.editing.todo = None;
        }
        Ok((index, removed))
    }

    pub(crate) fn edit_todo(&mut self, todo: &TodoRef, new_text: &str) -> StoreResult<TodoId> {
        let new_text = non_empty(new_text, ValidationError::EmptyText)?;
        let (_, entry) = self.selected_todo_mut(todo)?;
        entry.text = new_text.to_string();
        let id = entry.id.clone();
        if self.editing.is_editing_todo(&id) {
            self.editing.todo = None;
        }
        Ok(id)
    }

    pub(crate) fn toggle_todo(&mut self, todo: &TodoRef, completed: bool) -> StoreResult<TodoId> {
        let (_, entry) = self.selected_todo_mut(todo)?;
        entry.completed = completed;
        Ok(entry.id.clone())
    }

    pub(crate) fn set_theme(&mut self, theme: ThemeName) {
        self.theme = theme;
    }

    pub(crate) fn back_home(&mut self) {
        self.select(None);
    }

    /// Put one list or todo into edit mode, replacing any other edit of the
    /// same kind. Returns the target with todo positions resolved to ids.
    pub(crate) fn begin_editing(&mut self, target: &EditTarget) -> StoreResult<EditTarget> {
        match target {
            EditTarget::List(id) => {
                if self.list(id).is_none() {
                    return Err(StoreError::ListNotFound(id.clone()));
                }
                self.editing.list = Some(id.clone());
                Ok(EditTarget::List(id.clone()))
            }
            EditTarget::Todo(todo) => {
                let (_, entry) = self.selected_todo_mut(todo)?;
                let id = entry.id.clone();
                self.editing.todo = Some(id.clone());
                Ok(EditTarget::Todo(TodoRef::Id(id)))
            }
        }
    }

    pub(crate) fn cancel_editing(&mut self) {
        self.editing.clear();
    }

    pub(crate) fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Change the selection; a todo edit never survives leaving its list
    /// Any edit in progress belongs to the screen being left
    fn select(&mut self, id: Option<ListId>) {
        if self.selected_list_id != id {
            self.editing.clear();
        }
        self.selected_list_id = id;
    }
}

fn non_empty(value: &str, error: ValidationError) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(error)
    } else {
        Ok(trimmed)
    }
}
