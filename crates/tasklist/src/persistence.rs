//! Persisted snapshot
//!
//! The whole application state is stored as one JSON document under a single
//! key. Loading is lenient: anything missing or malformed falls back to a
//! default instead of failing, because there is no versioning field and
//! older snapshots must keep loading.

use crate::domain_models::{ListId, ThemeName, Todo, TodoId, TodoList};
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Data written to the key-value store; editing flags are never part of it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub lists: Vec<TodoList>,
    pub selected_list_id: Option<ListId>,
    pub theme: ThemeName,
}

impl Snapshot {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            lists: state.lists.clone(),
            selected_list_id: state.selected_list_id.clone(),
            theme: state.theme,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored document, defaulting whatever cannot be read
    pub fn parse_lenient(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(root)) => Self::from_object(&root),
            Ok(_) => {
                log::warn!("Stored state is not a JSON object, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Stored state is not valid JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    fn from_object(root: &Map<String, Value>) -> Self {
        let lists = parse_lists(root.get("lists"));

        let selected_list_id = truthy_id(root.get("selectedListId")).map(ListId::from);

        let theme = match root.get("theme") {
            None | Some(Value::Null) => ThemeName::Dark,
            Some(Value::String(s)) if s.is_empty() => ThemeName::Dark,
            Some(Value::String(s)) => s.parse().unwrap_or_else(|_| {
                log::warn!("Unknown theme '{}' in stored state, using dark", s);
                ThemeName::Dark
            }),
            Some(other) => {
                log::warn!("Unexpected theme value {} in stored state, using dark", other);
                ThemeName::Dark
            }
        };

        Self {
            lists,
            selected_list_id,
            theme,
        }
    }

    /// Build the in-memory state; a selection that does not resolve is dropped
    pub fn into_state(self) -> AppState {
        let selected_list_id = self.selected_list_id.filter(|id| {
            let found = self.lists.iter().any(|l| &l.id == id);
            if !found {
                log::warn!("Stored selection {} does not match any list, clearing it", id);
            }
            found
        });

        AppState {
            lists: self.lists,
            selected_list_id,
            theme: self.theme,
            ..AppState::default()
        }
    }
}

fn parse_lists(value: Option<&Value>) -> Vec<TodoList> {
    let items = match value {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => return Vec::new(),
        Some(other) => {
            log::warn!("Stored lists are not an array ({}), ignoring them", other);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(parse_list)
        .map(|mut list| {
            if !seen.insert(list.id.clone()) {
                log::warn!("Duplicate list id {} in stored state, assigning a new one", list.id);
                list.id = ListId::generate();
                seen.insert(list.id.clone());
            }
            list
        })
        .collect()
}

fn parse_list(value: &Value) -> Option<TodoList> {
    let Some(obj) = value.as_object() else {
        log::warn!("Skipping stored list that is not an object: {}", value);
        return None;
    };

    let Some(name) = non_empty_str(obj.get("name")) else {
        log::warn!("Skipping stored list without a name");
        return None;
    };

    let id = truthy_id(obj.get("id"))
        .map(ListId::from)
        .unwrap_or_else(ListId::generate);

    let mut seen = HashSet::new();
    let todos = match obj.get("todos") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(parse_todo)
            .map(|mut todo| {
                if !seen.insert(todo.id.clone()) {
                    todo.id = TodoId::generate();
                    seen.insert(todo.id.clone());
                }
                todo
            })
            .collect(),
        _ => Vec::new(),
    };

    Some(TodoList {
        id,
        name: name.to_string(),
        todos,
    })
}

fn parse_todo(value: &Value) -> Option<Todo> {
    let obj = value.as_object()?;
    let Some(text) = non_empty_str(obj.get("text")) else {
        log::warn!("Skipping stored todo without text");
        return None;
    };

    Some(Todo {
        id: truthy_id(obj.get("id"))
            .map(TodoId::from)
            .unwrap_or_else(TodoId::generate),
        text: text.to_string(),
        completed: obj.get("completed").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Read an id that may have been stored as a string or a number.
/// Empty strings, zero, `false` and `null` count as absent.
fn truthy_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
