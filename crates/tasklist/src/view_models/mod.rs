//! View models
//!
//! Pure functions of `(AppState, UiState)` that pre-compute everything a
//! view needs: text, counts, and styles. Views only lay them out.

pub mod footer;
pub mod homepage;
pub mod input;
pub mod list_detail;
pub mod status_bar;

pub use footer::{FooterViewModel, KeyHint};
pub use homepage::{HomepageViewModel, ListRowViewModel};
pub use input::InputViewModel;
pub use list_detail::{ListDetailViewModel, TodoRowViewModel};
pub use status_bar::StatusBarViewModel;
