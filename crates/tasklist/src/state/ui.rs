//! Renderer-local UI state
//!
//! Cursor positions and text typed into inputs that have not been submitted.
//! Nothing here is authoritative application data.

/// Which part of the screen receives typed characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Navigating rows
    #[default]
    Items,
    /// Typing into the "new list" / "new todo" input
    NewEntry,
    /// Typing a `:` command
    CommandLine,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub focus: Focus,
    /// Cursor row on the homepage
    pub home_cursor: usize,
    /// Cursor row in the list detail screen
    pub list_cursor: usize,
    /// Content of the "new list" / "new todo" input
    pub new_entry: String,
    /// Content of the in-place edit input
    pub edit_buffer: String,
    /// Content of the command line (without the leading ':')
    pub command_line: String,
}

impl UiState {
    /// Reset per-screen input state after the visible screen changed
    pub fn on_screen_change(&mut self) {
        self.focus = Focus::Items;
        self.list_cursor = 0;
        self.new_entry.clear();
        self.edit_buffer.clear();
    }

    /// Keep a cursor inside `0..len`
    pub fn clamp_cursors(&mut self, home_len: usize, list_len: usize) {
        self.home_cursor = self.home_cursor.min(home_len.saturating_sub(1));
        self.list_cursor = self.list_cursor.min(list_len.saturating_sub(1));
    }
}
