//! Application State Module
//!
//! `AppState` is the data owned by the store. `EditingState` is the view
//! state the store tracks next to it (never persisted). `UiState` and
//! `StatusBarState` belong to the renderer.

mod app;
mod editing;
mod status_bar;
mod ui;

pub use app::{AppState, UiMode};
pub use editing::{EditTarget, EditingState};
pub use status_bar::{StatusBarState, StatusKind, StatusMessage, StatusSource};
pub use ui::{Focus, UiState};
