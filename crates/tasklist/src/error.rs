//! Error types
//!
//! Validation and lookup failures never mutate state; the dispatcher
//! swallows them after logging. Persistence failures are recorded on the
//! store while the in-memory state stays authoritative.

use crate::actions::ActionType;
use crate::domain_models::{ListId, TodoRef};
use std::io;
use thiserror::Error;

/// Input rejected before it can reach the data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("list name must not be empty")]
    EmptyName,

    #[error("todo text must not be empty")]
    EmptyText,
}

/// Errors returned by store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("List not found: {0}")]
    ListNotFound(ListId),

    #[error("Todo not found: {0}")]
    TodoNotFound(TodoRef),

    #[error("No list selected")]
    NoListSelected,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure to read or write the persisted snapshot
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to read '{key}' from storage: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{key}' to storage: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A named action record that could not be turned into an `Action`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Unknown action type: {0}")]
    UnknownAction(String),

    #[error("Invalid payload for {action}: {reason}")]
    InvalidPayload { action: ActionType, reason: String },
}
