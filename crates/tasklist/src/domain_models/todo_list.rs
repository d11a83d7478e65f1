//! Todo list model

use super::{ListId, TodoId};
use serde::{Deserialize, Serialize};

/// A single task entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TodoId::generate(),
            text: text.into(),
            completed: false,
        }
    }
}

/// A named, ordered collection of todos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    pub todos: Vec<Todo>,
}

impl TodoList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ListId::generate(),
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// Resolve a todo reference to its current position
    pub fn position(&self, todo: &TodoRef) -> Option<usize> {
        match todo {
            TodoRef::Id(id) => self.todos.iter().position(|t| &t.id == id),
            TodoRef::Index(index) => (*index < self.todos.len()).then_some(*index),
        }
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }
}

/// Reference to a todo in the selected list
///
/// Stable ids are the normal form. Positions are accepted for callers that
/// only know what is on screen; they are resolved at the moment of the
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TodoRef {
    Id(TodoId),
    Index(usize),
}

impl std::fmt::Display for TodoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {}", id),
            Self::Index(index) => write!(f, "index {}", index),
        }
    }
}
