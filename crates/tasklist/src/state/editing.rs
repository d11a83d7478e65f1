//! In-place editing state

use crate::domain_models::{ListId, TodoId, TodoRef};

/// What an edit is aimed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    List(ListId),
    Todo(TodoRef),
}

/// Which list and which todo are currently in edit mode
///
/// One slot per kind, so at most one list and at most one todo can be edited
/// at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditingState {
    pub list: Option<ListId>,
    pub todo: Option<TodoId>,
}

impl EditingState {
    pub fn is_editing_list(&self, id: &ListId) -> bool {
        self.list.as_ref() == Some(id)
    }

    pub fn is_editing_todo(&self, id: &TodoId) -> bool {
        self.todo.as_ref() == Some(id)
    }

    pub fn clear(&mut self) {
        self.list = None;
        self.todo = None;
    }
}
