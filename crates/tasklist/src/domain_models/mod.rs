//! Domain models
//!
//! Core domain types used throughout the application.
//! These are pure domain concepts, separate from UI state.

pub mod ids;
pub mod theme_name;
pub mod todo_list;

pub use ids::{ListId, TodoId};
pub use theme_name::ThemeName;
pub use todo_list::{Todo, TodoList, TodoRef};
