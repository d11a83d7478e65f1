//! Status Bar State
//!
//! Feedback for the user about what the last action did. Messages are
//! renderer-side only; they never reach the store or the snapshot.

use crate::actions::ActionType;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt;

/// Kind of status message (determines icon and color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// A list or todo was created or changed
    Success,
    /// Bad command input or a storage write that failed
    Error,
    /// The request went through but changed nothing
    Warning,
    /// Deletions and theme switches
    Info,
}

impl StatusKind {
    /// Icon shown in front of the message
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "🚨",
            Self::Warning => "⚠️",
            Self::Info => "ℹ️",
        }
    }
}

/// What produced a status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSource {
    /// Reported by a dispatcher hook after the action ran
    Action(ActionType),
    /// A `:` command line, by the action name as typed
    CommandLine(String),
    /// The key-value store behind the state snapshot
    Storage,
}

impl fmt::Display for StatusSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action_type) => f.write_str(action_type.as_ref()),
            Self::CommandLine(name) => f.write_str(name),
            Self::Storage => f.write_str("STORAGE"),
        }
    }
}

/// A single status message with metadata
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// When the message was created
    pub timestamp: DateTime<Local>,
    pub kind: StatusKind,
    /// Short, user-facing text
    pub message: String,
    pub source: StatusSource,
}

impl StatusMessage {
    /// Create a message stamped with the current local time
    pub fn new(kind: StatusKind, message: impl Into<String>, source: StatusSource) -> Self {
        Self {
            timestamp: Local::now(),
            kind,
            message: message.into(),
            source,
        }
    }
}

/// Status bar state - history of messages
#[derive(Debug, Clone)]
pub struct StatusBarState {
    /// Message history (newest at back)
    pub messages: VecDeque<StatusMessage>,
    /// Oldest messages are dropped beyond this many
    pub max_history: usize,
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self {
            messages: VecDeque::new(),
            max_history: 100,
        }
    }
}

impl StatusBarState {
    /// The message the status bar shows
    pub fn latest(&self) -> Option<&StatusMessage> {
        self.messages.back()
    }

    /// Push a new message, trimming oldest if over limit
    pub fn push(&mut self, message: StatusMessage) {
        self.messages.push_back(message);
        if self.messages.len() > self.max_history {
            self.messages.pop_front();
        }
    }
}
