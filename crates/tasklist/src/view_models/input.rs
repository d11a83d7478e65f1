use ratatui::style::Style;
use tasklist_theme::Theme;

/// A single-line text input ("new list", "new todo")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputViewModel {
    pub label: &'static str,
    /// Typed text, or the placeholder when nothing was typed
    pub display_text: String,
    pub focused: bool,
    pub style: Style,
}

impl InputViewModel {
    pub fn new(
        label: &'static str,
        placeholder: &str,
        text: &str,
        focused: bool,
        theme: &Theme,
    ) -> Self {
        let (display_text, style) = if focused {
            (format!("{}▏", text), theme.input_focused())
        } else if text.is_empty() {
            (placeholder.to_string(), theme.muted())
        } else {
            (text.to_string(), theme.input())
        };

        Self {
            label,
            display_text,
            focused,
            style,
        }
    }
}
