//! Status Bar View Model
//!
//! Pre-computes presentation data for the status bar. An unresolved storage
//! failure takes precedence over the message history.

use crate::error::PersistenceError;
use crate::state::{StatusBarState, StatusKind, StatusSource};
use ratatui::style::{Color, Modifier, Style};
use tasklist_theme::Theme;

/// View model for rendering the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBarViewModel {
    /// Emoji/icon for the status
    pub emoji: &'static str,
    /// The message text
    pub message: String,
    /// Timestamp formatted for display (e.g., "14:32:05")
    pub timestamp: String,
    /// Source action for context
    pub source: String,
    /// Foreground style (color based on kind)
    pub message_style: Style,
    /// Background color for the bar
    pub bg_color: Color,
    /// Style for metadata (timestamp, source)
    pub metadata_style: Style,
}

impl StatusBarViewModel {
    pub fn from_state(
        status: &StatusBarState,
        persist_error: Option<&PersistenceError>,
        theme: &Theme,
    ) -> Self {
        let metadata_style = Style::default().fg(theme.text_muted);

        if let Some(error) = persist_error {
            return Self {
                emoji: StatusKind::Error.emoji(),
                message: format!("Changes are not saved: {} (Ctrl+S to retry)", error),
                timestamp: String::new(),
                source: StatusSource::Storage.to_string(),
                message_style: theme.error(),
                bg_color: theme.bg_primary,
                metadata_style,
            };
        }

        if let Some(msg) = status.latest() {
            let message_style = match msg.kind {
                StatusKind::Success => theme.success(),
                StatusKind::Error => theme.error(),
                StatusKind::Warning => theme.warning(),
                StatusKind::Info => Style::default()
                    .fg(theme.status_info)
                    .add_modifier(Modifier::BOLD),
            };

            Self {
                emoji: msg.kind.emoji(),
                message: msg.message.clone(),
                timestamp: msg.timestamp.format("%H:%M:%S").to_string(),
                source: msg.source.to_string(),
                message_style,
                bg_color: theme.bg_primary,
                metadata_style,
            }
        } else {
            // Welcome message when no status messages
            Self {
                emoji: "👋",
                message: "Welcome to tasklist".to_string(),
                timestamp: String::new(),
                source: String::new(),
                message_style: Style::default()
                    .fg(theme.text_muted)
                    .add_modifier(Modifier::ITALIC),
                bg_color: theme.bg_primary,
                metadata_style,
            }
        }
    }
}
