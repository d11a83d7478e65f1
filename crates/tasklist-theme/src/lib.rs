use ratatui::{prelude::*, style::palette::tailwind};

/// Application theme - centralized color and style management
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_panel: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_done: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Status colors
    pub status_success: Color,
    pub status_error: Color,
    pub status_warning: Color,
    pub status_info: Color,

    // Selection colors
    pub selected_bg: Color,
    pub selected_fg: Color,

    // Input colors
    pub input_bg: Color,
    pub input_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg_primary: tailwind::SLATE.c950,
            bg_secondary: tailwind::SLATE.c900,
            bg_panel: tailwind::SLATE.c800,

            text_primary: tailwind::SLATE.c100,
            text_secondary: tailwind::SLATE.c200,
            text_muted: tailwind::SLATE.c400,
            text_done: tailwind::SLATE.c500,

            accent_primary: tailwind::CYAN.c400,
            accent_secondary: tailwind::CYAN.c600,

            status_success: tailwind::GREEN.c400,
            status_error: tailwind::RED.c400,
            status_warning: tailwind::YELLOW.c400,
            status_info: tailwind::BLUE.c400,

            selected_bg: tailwind::BLUE.c400,
            selected_fg: Color::White,

            input_bg: tailwind::SLATE.c800,
            input_fg: tailwind::SLATE.c100,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg_primary: tailwind::SLATE.c50,
            bg_secondary: tailwind::SLATE.c100,
            bg_panel: tailwind::SLATE.c200,

            text_primary: tailwind::SLATE.c900,
            text_secondary: tailwind::SLATE.c800,
            text_muted: tailwind::SLATE.c500,
            text_done: tailwind::SLATE.c400,

            accent_primary: tailwind::CYAN.c700,
            accent_secondary: tailwind::CYAN.c500,

            status_success: tailwind::GREEN.c700,
            status_error: tailwind::RED.c700,
            status_warning: tailwind::AMBER.c700,
            status_info: tailwind::BLUE.c700,

            selected_bg: tailwind::BLUE.c600,
            selected_fg: Color::White,

            input_bg: Color::White,
            input_fg: tailwind::SLATE.c900,
        }
    }

    // Prebuilt styles for common use cases

    /// Style for panel backgrounds
    pub fn panel_background(&self) -> Style {
        Style::default().bg(self.bg_primary).fg(self.text_primary)
    }

    /// Style for panel borders
    pub fn panel_border(&self) -> Style {
        Style::default()
            .fg(self.accent_secondary)
            .bg(self.bg_primary)
    }

    /// Style for panel titles
    pub fn panel_title(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints (e.g., "Enter" in "Enter select")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    pub fn key_description(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Style for the row under the cursor
    pub fn row_selected(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for normal rows
    pub fn row(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Style for completed todos
    pub fn row_done(&self) -> Style {
        Style::default()
            .fg(self.text_done)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// Style for text inputs
    pub fn input(&self) -> Style {
        Style::default().fg(self.input_fg).bg(self.input_bg)
    }

    /// Style for a focused text input
    pub fn input_focused(&self) -> Style {
        self.input().add_modifier(Modifier::BOLD)
    }

    /// Style for error messages
    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.status_error)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for success messages
    pub fn success(&self) -> Style {
        Style::default()
            .fg(self.status_success)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for warning messages
    pub fn warning(&self) -> Style {
        Style::default()
            .fg(self.status_warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for muted/helper text
    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for primary text
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }
}
