//! Action dispatcher
//!
//! Single entry point for user intents. Each `Action` is routed to exactly
//! one store operation; afterwards every hook that accepts the action type
//! observes the committed outcome.
//!
//! Validation and lookup failures are treated as noise: they are logged and
//! the dispatch yields `None`, leaving the state untouched.

use crate::actions::{Action, ActionOutcome, ActionType};
use crate::error::{StoreError, StoreResult};
use crate::hooks::{CallbackHook, Hook};
use crate::state::AppState;
use crate::store::Store;
use serde_json::Value;

/// Routes actions to the store and notifies hooks
#[derive(Default)]
pub struct Dispatcher {
    hooks: Vec<Box<dyn Hook>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook (hooks run in the order they were added)
    pub fn add_hook(&mut self, hook: Box<dyn Hook>) {
        self.hooks.push(hook);
    }

    /// Register a closure that runs after every committed `action_type`
    pub fn on(
        &mut self,
        action_type: ActionType,
        callback: impl FnMut(&ActionOutcome, &AppState) + 'static,
    ) {
        self.add_hook(Box::new(CallbackHook::new(action_type, callback)));
    }

    /// Perform `action` against `store`
    ///
    /// Returns the outcome when the store accepted the action, `None` when it
    /// was rejected.
    pub fn dispatch(&mut self, store: &mut Store, action: Action) -> Option<ActionOutcome> {
        let action_type = action.action_type();

        match route(store, action) {
            Ok(outcome) => {
                for hook in self.hooks.iter_mut() {
                    if hook.accepts(action_type) {
                        hook.after_action(&outcome, store.state());
                    }
                }
                Some(outcome)
            }
            Err(e) => {
                report_rejection(action_type, &e);
                None
            }
        }
    }

    /// Perform a named action record, e.g. `("ADD_TODO", {"text": "Milk"})`
    ///
    /// Unknown action types and malformed payloads are logged as warnings and
    /// dropped without touching the store.
    pub fn dispatch_named(
        &mut self,
        store: &mut Store,
        action_type: &str,
        payload: &Value,
    ) -> Option<ActionOutcome> {
        match Action::from_record(action_type, payload) {
            Ok(action) => self.dispatch(store, action),
            Err(e) => {
                log::warn!("Dropping action: {}", e);
                None
            }
        }
    }
}

fn route(store: &mut Store, action: Action) -> StoreResult<ActionOutcome> {
    let outcome = match action {
        Action::AddList { name } => {
            let id = store.add_list(&name)?;
            ActionOutcome::ListAdded {
                id,
                name: name.trim().to_string(),
            }
        }
        Action::SelectList { id } => {
            store.select_list(&id)?;
            ActionOutcome::ListSelected { id }
        }
        Action::EditList { id, new_name } => {
            store.edit_list_name(&id, &new_name)?;
            ActionOutcome::ListRenamed {
                id,
                name: new_name.trim().to_string(),
            }
        }
        Action::DeleteList { id } => {
            let removed = store.delete_list(&id)?;
            ActionOutcome::ListDeleted {
                id,
                name: removed.name,
            }
        }
        Action::AddTodo { text } => {
            let todo_id = store.add_todo(&text)?;
            let list_id = store
                .state()
                .selected_list_id
                .clone()
                .ok_or(StoreError::NoListSelected)?;
            ActionOutcome::TodoAdded { list_id, todo_id }
        }
        Action::EditTodo { todo, new_text } => {
            let todo_id = store.edit_todo(&todo, &new_text)?;
            ActionOutcome::TodoEdited {
                todo_id,
                text: new_text.trim().to_string(),
            }
        }
        Action::DeleteTodo { todo } => {
            let (index, removed) = store.delete_todo(&todo)?;
            ActionOutcome::TodoDeleted {
                todo_id: removed.id,
                index,
            }
        }
        Action::ToggleTodo { todo, completed } => {
            let todo_id = store.toggle_todo(&todo, completed)?;
            ActionOutcome::TodoToggled { todo_id, completed }
        }
        Action::ChangeTheme { theme } => {
            store.set_theme(theme)?;
            ActionOutcome::ThemeChanged { theme }
        }
        Action::BackHome => {
            store.back_home()?;
            ActionOutcome::WentHome
        }
        Action::BeginEditing { target } => {
            let target = store.begin_editing(&target)?;
            ActionOutcome::EditingStarted { target }
        }
        Action::CancelEditing => {
            store.cancel_editing();
            ActionOutcome::EditingCancelled
        }
    };

    Ok(outcome)
}

fn report_rejection(action_type: ActionType, error: &StoreError) {
    match error {
        StoreError::Validation(_) => log::debug!("Ignoring {}: {}", action_type, error),
        StoreError::ListNotFound(_) | StoreError::TodoNotFound(_) | StoreError::NoListSelected => {
            log::info!("Ignoring {}: {}", action_type, error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::{ListId, ThemeName, TodoRef};
    use crate::persistence::Snapshot;
    use crate::store::tests::{store_with, SharedBackend};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_groceries_scenario() {
        let backend = SharedBackend::default();
        let mut store = store_with(&backend);
        let mut dispatcher = Dispatcher::new();

        dispatcher.dispatch_named(&mut store, "ADD_LIST", &json!({"name": "Groceries"}));
        let state = store.state();
        assert_eq!(state.lists.len(), 1);
        assert_eq!(state.lists[0].name, "Groceries");
        let list_id = state.lists[0].id.clone();
        assert_eq!(state.selected_list_id, Some(list_id.clone()));

        dispatcher.dispatch_named(&mut store, "ADD_TODO", &json!({"text": "Milk"}));
        let todos = &store.state().selected_list().unwrap().todos;
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "Milk");
        assert!(!todos[0].completed);
        let before_toggle = todos[0].clone();

        dispatcher.dispatch_named(
            &mut store,
            "TOGGLE_TODO",
            &json!({"index": 0, "completed": true}),
        );
        let todo = &store.state().selected_list().unwrap().todos[0];
        assert!(todo.completed);
        assert_eq!(todo.text, before_toggle.text);
        assert_eq!(todo.id, before_toggle.id);

        let lists_before_home = store.state().lists.clone();
        dispatcher.dispatch_named(&mut store, "BACK_HOME", &json!({}));
        assert_eq!(store.state().selected_list_id, None);
        assert_eq!(store.state().lists, lists_before_home);

        dispatcher.dispatch_named(&mut store, "SELECT_LIST", &json!({"id": list_id.as_str()}));
        dispatcher.dispatch_named(&mut store, "DELETE_TODO", &json!({"index": 0}));
        assert!(store.state().selected_list().unwrap().todos.is_empty());

        dispatcher.dispatch_named(&mut store, "CHANGE_THEME", &json!({"theme": "light"}));
        assert_eq!(store.state().theme, ThemeName::Light);
        assert_eq!(backend.stored().unwrap().theme, ThemeName::Light);
    }

    #[test]
    fn test_unknown_action_is_dropped() {
        let backend = SharedBackend::default();
        let mut store = store_with(&backend);
        let mut dispatcher = Dispatcher::new();
        let before = store.state().clone();

        let outcome = dispatcher.dispatch_named(&mut store, "EXPLODE", &json!({"id": "x"}));
        assert_eq!(outcome, None);
        assert_eq!(store.state(), &before);
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn test_hooks_see_committed_outcomes_only() {
        let mut store = Store::in_memory();
        let mut dispatcher = Dispatcher::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let toggles = Rc::new(RefCell::new(Vec::new()));

        let all = Rc::clone(&seen);
        struct Recorder(Rc<RefCell<Vec<ActionType>>>);
        impl Hook for Recorder {
            fn after_action(&mut self, outcome: &ActionOutcome, _state: &AppState) {
                self.0.borrow_mut().push(outcome.action_type());
            }
        }
        dispatcher.add_hook(Box::new(Recorder(all)));

        let only_toggles = Rc::clone(&toggles);
        dispatcher.on(ActionType::ToggleTodo, move |outcome, state| {
            // The mutation is already visible.
            if let ActionOutcome::TodoToggled { todo_id, completed } = outcome {
                let todo = state
                    .selected_list()
                    .and_then(|l| l.todos.iter().find(|t| &t.id == todo_id))
                    .map(|t| t.completed);
                assert_eq!(todo, Some(*completed));
            }
            only_toggles.borrow_mut().push(outcome.clone());
        });

        dispatcher.dispatch(&mut store, Action::AddList { name: "  ".into() });
        dispatcher.dispatch(&mut store, Action::AddList { name: "Work".into() });
        dispatcher.dispatch(&mut store, Action::AddTodo { text: "Report".into() });
        dispatcher.dispatch(
            &mut store,
            Action::ToggleTodo {
                todo: TodoRef::Index(0),
                completed: true,
            },
        );
        dispatcher.dispatch(
            &mut store,
            Action::ToggleTodo {
                todo: TodoRef::Index(5),
                completed: true,
            },
        );

        assert_eq!(
            *seen.borrow(),
            vec![ActionType::AddList, ActionType::AddTodo, ActionType::ToggleTodo]
        );
        assert_eq!(toggles.borrow().len(), 1);
    }

    #[test]
    fn test_delete_list_is_routed() {
        let mut store = Store::in_memory();
        let mut dispatcher = Dispatcher::new();
        let outcome = dispatcher
            .dispatch(&mut store, Action::AddList { name: "Old".into() })
            .unwrap();
        let ActionOutcome::ListAdded { id, .. } = outcome else {
            panic!("unexpected outcome {:?}", outcome);
        };

        let deleted = dispatcher.dispatch(&mut store, Action::DeleteList { id: id.clone() });
        assert_eq!(
            deleted,
            Some(ActionOutcome::ListDeleted {
                id: id.clone(),
                name: "Old".to_string()
            })
        );
        assert!(store.state().lists.is_empty());
        assert_eq!(store.state().selected_list_id, None);

        // Deleting again is a silent no-op.
        assert_eq!(dispatcher.dispatch(&mut store, Action::DeleteList { id }), None);
        let missing = ListId::from("never-existed");
        assert_eq!(
            dispatcher.dispatch(&mut store, Action::SelectList { id: missing }),
            None
        );
    }

    #[test]
    fn test_stable_ids_survive_deletion_elsewhere() {
        let mut store = Store::in_memory();
        let mut dispatcher = Dispatcher::new();
        dispatcher.dispatch(&mut store, Action::AddList { name: "L".into() });
        for text in ["a", "b", "c"] {
            dispatcher.dispatch(&mut store, Action::AddTodo { text: text.into() });
        }
        let c_id = store.state().selected_list().unwrap().todos[2].id.clone();

        dispatcher.dispatch(&mut store, Action::DeleteTodo { todo: TodoRef::Index(0) });
        dispatcher.dispatch(
            &mut store,
            Action::EditTodo {
                todo: TodoRef::Id(c_id.clone()),
                new_text: "c2".into(),
            },
        );

        let todos = &store.state().selected_list().unwrap().todos;
        assert_eq!(todos[0].text, "b");
        assert_eq!(todos[1].text, "c2");
        assert_eq!(todos[1].id, c_id);
    }

    #[test]
    fn test_persisted_after_each_dispatch() {
        let backend = SharedBackend::default();
        let mut store = store_with(&backend);
        let mut dispatcher = Dispatcher::new();

        dispatcher.dispatch(&mut store, Action::AddList { name: "Groceries".into() });
        dispatcher.dispatch(&mut store, Action::AddTodo { text: "Milk".into() });
        assert_eq!(
            backend.stored().unwrap(),
            Snapshot::from_state(store.state())
        );
    }
}
