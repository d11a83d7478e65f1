use crate::actions::{ActionOutcome, ActionType};
use crate::hooks::Hook;
use crate::state::AppState;

type Callback = Box<dyn FnMut(&ActionOutcome, &AppState)>;

/// CallbackHook - runs a closure for one action type
pub struct CallbackHook {
    action_type: ActionType,
    callback: Callback,
}

impl CallbackHook {
    pub fn new(
        action_type: ActionType,
        callback: impl FnMut(&ActionOutcome, &AppState) + 'static,
    ) -> Self {
        Self {
            action_type,
            callback: Box::new(callback),
        }
    }
}

impl Hook for CallbackHook {
    fn accepts(&self, action_type: ActionType) -> bool {
        action_type == self.action_type
    }

    fn after_action(&mut self, outcome: &ActionOutcome, state: &AppState) {
        (self.callback)(outcome, state);
    }
}
