use crate::domain_models::{ListId, ThemeName, Todo, TodoId, TodoList, TodoRef};
use crate::error::{PersistenceError, StoreResult};
use crate::persistence::Snapshot;
use crate::state::{AppState, EditTarget};
use tasklist_config::KeyValueStore;

/// Callback run after every successful mutation
pub type Listener = Box<dyn FnMut(&AppState)>;

/// Handle returned by `Store::subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Store - owns the application state, persists it and notifies listeners
///
/// Every data mutation follows the same sequence: mutate, write the full
/// snapshot to the key-value backend, then call listeners in registration
/// order. A failed operation (validation, lookup) changes nothing and
/// notifies no one. A failed write keeps the mutation in memory; the error
/// is recorded and available through `last_persist_error`.
pub struct Store {
    state: AppState,
    backend: Box<dyn KeyValueStore>,
    key: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    last_persist_error: Option<PersistenceError>,
}

impl Store {
    /// Rehydrate from `backend`, defaulting to an empty state
    pub fn load(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut last_persist_error = None;

        let state = match backend.get(&key) {
            Ok(Some(raw)) => {
                let state = Snapshot::parse_lenient(&raw).into_state();
                log::info!(
                    "Loaded {} list(s) from storage key '{}'",
                    state.lists.len(),
                    key
                );
                state
            }
            Ok(None) => {
                log::info!("No stored state under '{}', starting empty", key);
                AppState::default()
            }
            Err(source) => {
                log::error!("Failed to read stored state: {}", source);
                last_persist_error = Some(PersistenceError::Read {
                    key: key.clone(),
                    source,
                });
                AppState::default()
            }
        };

        Self {
            state,
            backend,
            key,
            listeners: Vec::new(),
            next_subscription: 0,
            last_persist_error,
        }
    }

    /// Store backed by memory only (nothing survives the process)
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::load(Box::new(tasklist_config::MemoryKeyValueStore::new()), "appState")
    }

    /// Get the current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Most recent write failure, cleared by the next successful write
    pub fn last_persist_error(&self) -> Option<&PersistenceError> {
        self.last_persist_error.as_ref()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the subscription was already gone
    #[allow(dead_code)]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn add_list(&mut self, name: &str) -> StoreResult<ListId> {
        self.commit(|state| state.add_list(name))
    }

    pub fn select_list(&mut self, id: &ListId) -> StoreResult<()> {
        self.commit(|state| state.select_list(id))
    }

    pub fn edit_list_name(&mut self, id: &ListId, new_name: &str) -> StoreResult<()> {
        self.commit(|state| state.edit_list_name(id, new_name))
    }

    pub fn delete_list(&mut self, id: &ListId) -> StoreResult<TodoList> {
        self.commit(|state| state.delete_list(id))
    }

    pub fn add_todo(&mut self, text: &str) -> StoreResult<TodoId> {
        self.commit(|state| state.add_todo(text))
    }

    /// Remove a todo from the selected list, returning its old position
    pub fn delete_todo(&mut self, todo: &TodoRef) -> StoreResult<(usize, Todo)> {
        self.commit(|state| state.delete_todo(todo))
    }

    pub fn edit_todo(&mut self, todo: &TodoRef, new_text: &str) -> StoreResult<TodoId> {
        self.commit(|state| state.edit_todo(todo, new_text))
    }

    pub fn toggle_todo(&mut self, todo: &TodoRef, completed: bool) -> StoreResult<TodoId> {
        self.commit(|state| state.toggle_todo(todo, completed))
    }

    pub fn set_theme(&mut self, theme: ThemeName) -> StoreResult<()> {
        self.commit(|state| {
            state.set_theme(theme);
            Ok(())
        })
    }

    /// Clear the selection without touching any list
    pub fn back_home(&mut self) -> StoreResult<()> {
        self.commit(|state| {
            state.back_home();
            Ok(())
        })
    }

    /// Editing flags are view state: listeners are notified, nothing is written.
    pub fn begin_editing(&mut self, target: &EditTarget) -> StoreResult<EditTarget> {
        let resolved = self.state.begin_editing(target)?;
        self.notify();
        Ok(resolved)
    }

    pub fn cancel_editing(&mut self) {
        self.state.cancel_editing();
        self.notify();
    }

    /// Leave the loading phase
    pub fn finish_loading(&mut self) {
        if !self.state.loading {
            return;
        }
        self.state.finish_loading();
        self.notify();
    }

    /// Write the current snapshot again; true when storage is now in sync
    pub fn retry_persist(&mut self) -> bool {
        self.persist();
        self.last_persist_error.is_none()
    }

    fn commit<T>(&mut self, op: impl FnOnce(&mut AppState) -> StoreResult<T>) -> StoreResult<T> {
        let value = op(&mut self.state)?;
        self.persist();
        self.notify();
        Ok(value)
    }

    fn persist(&mut self) {
        match self.write_snapshot() {
            Ok(()) => {
                if self.last_persist_error.take().is_some() {
                    log::info!("Storage write succeeded again, state is in sync");
                }
            }
            Err(e) => {
                log::error!("{}; keeping changes in memory", e);
                self.last_persist_error = Some(e);
            }
        }
    }

    fn write_snapshot(&mut self) -> Result<(), PersistenceError> {
        let json = Snapshot::from_state(&self.state).to_json()?;
        self.backend
            .set(&self.key, &json)
            .map_err(|source| PersistenceError::Write {
                key: self.key.clone(),
                source,
            })
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{StoreError, ValidationError};
    use crate::state::UiMode;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::rc::Rc;
    use tasklist_config::MemoryKeyValueStore;

    /// Backend whose contents stay observable after being boxed into a store
    #[derive(Clone, Default)]
    pub(crate) struct SharedBackend {
        inner: Rc<RefCell<MemoryKeyValueStore>>,
        writes: Rc<Cell<usize>>,
        fail_writes: Rc<Cell<bool>>,
    }

    impl SharedBackend {
        pub(crate) fn stored(&self) -> Option<Snapshot> {
            self.inner
                .borrow()
                .get("appState")
                .unwrap()
                .map(|raw| Snapshot::parse_lenient(&raw))
        }

        pub(crate) fn writes(&self) -> usize {
            self.writes.get()
        }

        pub(crate) fn set_failing(&self, failing: bool) {
            self.fail_writes.set(failing);
        }
    }

    impl KeyValueStore for SharedBackend {
        fn get(&self, key: &str) -> io::Result<Option<String>> {
            self.inner.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
            if self.fail_writes.get() {
                return Err(io::Error::other("quota exceeded"));
            }
            self.writes.set(self.writes.get() + 1);
            self.inner.borrow_mut().set(key, value)
        }
    }

    pub(crate) fn store_with(backend: &SharedBackend) -> Store {
        let mut store = Store::load(Box::new(backend.clone()), "appState");
        store.finish_loading();
        store
    }

    #[test]
    fn test_load_defaults_when_empty() {
        let store = Store::in_memory();
        let state = store.state();
        assert!(state.lists.is_empty());
        assert_eq!(state.selected_list_id, None);
        assert_eq!(state.theme, ThemeName::Dark);
        assert_eq!(state.ui_mode(), UiMode::Loading);
    }

    #[test]
    fn test_load_rehydrates_previous_session() {
        let backend = SharedBackend::default();
        let mut store = store_with(&backend);
        let id = store.add_list("Groceries").unwrap();
        store.add_todo("Milk").unwrap();
        store.set_theme(ThemeName::Light).unwrap();

        let reloaded = store_with(&backend);
        assert_eq!(
            Snapshot::from_state(reloaded.state()),
            Snapshot::from_state(store.state())
        );
        assert_eq!(reloaded.state().selected_list_id, Some(id));
    }

    #[test]
    fn test_empty_input_is_rejected_without_persist_or_notify() {
        let backend = SharedBackend::default();
        let mut store = store_with(&backend);
        let notified = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notified);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        assert_eq!(
            store.add_list(""),
            Err(StoreError::Validation(ValidationError::EmptyName))
        );
        assert_eq!(
            store.add_list("   "),
            Err(StoreError::Validation(ValidationError::EmptyName))
        );
        assert!(store.state().lists.is_empty());

        store.add_list("Groceries").unwrap();
        let writes = backend.writes();
        let notifications = notified.get();

        assert_eq!(
            store.add_todo(""),
            Err(StoreError::Validation(ValidationError::EmptyText))
        );
        assert!(store.state().selected_list().unwrap().todos.is_empty());
        assert_eq!(backend.writes(), writes);
        assert_eq!(notified.get(), notifications);
    }

    #[test]
    fn test_listeners_run_in_order_after_persist() {
        let backend = SharedBackend::default();
        let mut store = store_with(&backend);
        let calls = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second"] {
            let calls = Rc::clone(&calls);
            let backend = backend.clone();
            store.subscribe(move |state| {
                // Storage already reflects what the listener sees.
                let stored = backend.stored().unwrap();
                assert_eq!(stored, Snapshot::from_state(state));
                calls.borrow_mut().push(name);
            });
        }

        store.add_list("Groceries").unwrap();
        assert_eq!(*calls.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = Store::in_memory();
        let notified = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notified);
        let id = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.add_list("Groceries").unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add_list("Work").unwrap();
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn test_single_editing_invariant() {
        let mut store = Store::in_memory();
        let a = store.add_list("A").unwrap();
        let b = store.add_list("B").unwrap();
        let c = store.add_list("C").unwrap();
        for text in ["x", "y", "z"] {
            store.add_todo(text).unwrap();
        }

        for id in [&a, &c, &b, &a] {
            store.begin_editing(&EditTarget::List(id.clone())).unwrap();
            assert_eq!(store.state().editing.list.as_ref(), Some(id));
        }
        for index in [2, 0, 1] {
            let target = EditTarget::Todo(TodoRef::Index(index));
            store.begin_editing(&target).unwrap();
            let expected = &store.state().selected_list().unwrap().todos[index].id;
            assert_eq!(store.state().editing.todo.as_ref(), Some(expected));
        }

        // A failed begin leaves the current edit in place.
        let missing = EditTarget::List(ListId::from("missing"));
        assert!(store.begin_editing(&missing).is_err());
        assert_eq!(store.state().editing.list, Some(a));
    }

    #[test]
    fn test_editing_is_not_persisted() {
        let backend = SharedBackend::default();
        let mut store = store_with(&backend);
        let id = store.add_list("Groceries").unwrap();
        let writes = backend.writes();

        store.begin_editing(&EditTarget::List(id.clone())).unwrap();
        store.cancel_editing();
        assert_eq!(backend.writes(), writes);

        store.begin_editing(&EditTarget::List(id.clone())).unwrap();
        store.edit_list_name(&id, "Shopping").unwrap();
        assert_eq!(store.state().editing.list, None);
        assert_eq!(store.state().lists[0].name, "Shopping");
    }

    #[test]
    fn test_not_found_leaves_state_unchanged() {
        let mut store = Store::in_memory();
        store.add_list("Groceries").unwrap();
        store.add_todo("Milk").unwrap();
        let before = store.state().clone();

        let missing = ListId::from("missing");
        assert_eq!(
            store.select_list(&missing),
            Err(StoreError::ListNotFound(missing.clone()))
        );
        assert!(store.delete_list(&missing).is_err());
        assert!(store.edit_list_name(&missing, "x").is_err());
        assert_eq!(
            store.delete_todo(&TodoRef::Index(1)),
            Err(StoreError::TodoNotFound(TodoRef::Index(1)))
        );
        assert!(store.toggle_todo(&TodoRef::Index(9), true).is_err());
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_write_failure_keeps_memory_and_reports() {
        let backend = SharedBackend::default();
        let mut store = store_with(&backend);
        let notified = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notified);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        backend.set_failing(true);
        store.add_list("Groceries").unwrap();
        assert_eq!(store.state().lists.len(), 1);
        assert_eq!(notified.get(), 1);
        assert!(matches!(
            store.last_persist_error(),
            Some(PersistenceError::Write { .. })
        ));
        assert!(!store.retry_persist());

        backend.set_failing(false);
        assert!(store.retry_persist());
        assert!(store.last_persist_error().is_none());
        assert_eq!(backend.stored().unwrap().lists.len(), 1);
    }

    #[test]
    fn test_delete_list_not_selected_keeps_selection() {
        let mut store = Store::in_memory();
        let first = store.add_list("First").unwrap();
        let second = store.add_list("Second").unwrap();

        store.delete_list(&first).unwrap();
        assert_eq!(store.state().selected_list_id, Some(second));
        assert_eq!(store.state().lists.len(), 1);
    }

    #[test]
    fn test_back_home_keeps_data() {
        let mut store = Store::in_memory();
        store.add_list("Groceries").unwrap();
        store.add_todo("Milk").unwrap();
        let lists = store.state().lists.clone();

        store.back_home().unwrap();
        assert_eq!(store.state().selected_list_id, None);
        assert_eq!(store.state().lists, lists);
    }
}
