use crate::actions::ActionOutcome;
use crate::hooks::Hook;
use crate::state::AppState;

/// LoggingHook - logs every committed action
#[derive(Default)]
pub struct LoggingHook;

impl LoggingHook {
    pub fn new() -> Self {
        Self
    }
}

impl Hook for LoggingHook {
    fn after_action(&mut self, outcome: &ActionOutcome, state: &AppState) {
        log::debug!(
            "{}: {} ({} list(s), mode {:?})",
            outcome.action_type(),
            outcome,
            state.lists.len(),
            state.ui_mode()
        );
    }
}
