use crate::actions::{ActionOutcome, ActionType};
use crate::state::AppState;

pub mod callback;
pub mod logging;

pub use callback::CallbackHook;
pub use logging::LoggingHook;

/// Hook trait - observes actions after the store committed them
///
/// Hooks run synchronously, in registration order, once the mutation has
/// been applied, persisted and broadcast to store listeners. They receive a
/// read-only view of the state, so they cannot veto or alter the change.
pub trait Hook {
    /// Whether this hook wants to see outcomes of `action_type`
    fn accepts(&self, _action_type: ActionType) -> bool {
        true
    }

    /// Observe a committed action
    ///
    /// - `outcome`: identifiers and new values of what changed
    /// - `state`: application state after the change
    fn after_action(&mut self, outcome: &ActionOutcome, state: &AppState);
}
