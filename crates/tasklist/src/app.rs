//! Application loop
//!
//! Owns the store, the dispatcher and all UI-local state. Key presses go
//! through the keyboard handler; resulting actions are dispatched; a store
//! listener flags the screen for redrawing.

use crate::actions::{Action, ActionOutcome, ActionType};
use crate::dispatcher::Dispatcher;
use crate::domain_models::TodoRef;
use crate::hooks::LoggingHook;
use crate::keyboard::{self, KeyCommand};
use crate::state::{
    AppState, EditTarget, StatusBarState, StatusKind, StatusMessage, StatusSource, UiState,
};
use crate::store::Store;
use crate::views;
use ratatui::{
    backend::Backend,
    crossterm::event::{self, Event, KeyEvent, KeyEventKind},
    Frame, Terminal,
};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tasklist_config::AppConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    store: Store,
    dispatcher: Dispatcher,
    ui: UiState,
    status: Rc<RefCell<StatusBarState>>,
    redraw: Rc<Cell<bool>>,
    loading_until: Option<Instant>,
    running: bool,
}

impl App {
    pub fn new(mut store: Store, config: &AppConfig) -> Self {
        let redraw = Rc::new(Cell::new(true));
        let flag = Rc::clone(&redraw);
        store.subscribe(move |_| flag.set(true));

        let status = Rc::new(RefCell::new(StatusBarState::default()));
        let mut dispatcher = Dispatcher::new();
        dispatcher.add_hook(Box::new(LoggingHook::new()));
        register_status_hooks(&mut dispatcher, &status);

        let loading_until = if config.loading_delay_ms == 0 {
            store.finish_loading();
            None
        } else {
            Some(Instant::now() + Duration::from_millis(config.loading_delay_ms))
        };

        Self {
            store,
            dispatcher,
            ui: UiState::default(),
            status,
            redraw,
            loading_until,
            running: true,
        }
    }

    /// Main loop: draw when flagged, then wait for the next key
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        while self.running {
            self.tick(Instant::now());

            if self.redraw.replace(false) {
                terminal.draw(|f| self.draw(f))?;
            }

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    // Only process key press events (ignore key release)
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Resize(_, _) => self.redraw.set(true),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    pub fn draw(&self, f: &mut Frame) {
        views::render(&self.store, &self.ui, &self.status.borrow(), f);
    }

    /// End the loading phase once the configured delay has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(until) = self.loading_until {
            if now >= until {
                self.loading_until = None;
                self.store.finish_loading();
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let mode_before = self.store.state().ui_mode();
        let selection_before = self.store.state().selected_list_id.clone();

        match keyboard::handle_key(key, self.store.state(), &mut self.ui) {
            KeyCommand::None => {}
            KeyCommand::Quit => {
                log::info!("Quit requested");
                self.running = false;
            }
            KeyCommand::Dispatch(action) => {
                self.dispatch(action);
            }
            KeyCommand::SubmitNewEntry(action) => {
                if let Some(outcome) = self.dispatch(action) {
                    self.ui.new_entry.clear();
                    if let ActionOutcome::TodoAdded { .. } = outcome {
                        let state = self.store.state();
                        let len = state.selected_list().map_or(0, |l| l.todos.len());
                        self.ui.list_cursor = len.saturating_sub(1);
                    }
                }
            }
            KeyCommand::RunCommandLine(line) => self.run_command_line(&line),
            KeyCommand::RetryPersist => self.retry_persist(),
        }

        let state = self.store.state();
        if state.ui_mode() != mode_before || state.selected_list_id != selection_before {
            self.ui.on_screen_change();
        }
        let home_len = state.lists.len();
        let list_len = state.selected_list().map_or(0, |l| l.todos.len());
        self.ui.clamp_cursors(home_len, list_len);

        // UI-local changes (cursor, typed text) need a redraw too
        self.redraw.set(true);
    }

    fn dispatch(&mut self, action: Action) -> Option<ActionOutcome> {
        let outcome = self.dispatcher.dispatch(&mut self.store, action);
        self.prefill_edit(outcome.as_ref());
        outcome
    }

    /// A freshly started edit begins with the current name or text
    fn prefill_edit(&mut self, outcome: Option<&ActionOutcome>) {
        if let Some(ActionOutcome::EditingStarted { target }) = outcome {
            self.ui.edit_buffer = current_value(self.store.state(), target).unwrap_or_default();
        }
    }

    /// Run `ACTION_TYPE {json}` through the named dispatch path
    fn run_command_line(&mut self, line: &str) {
        let line = line.trim();
        let (name, raw_payload) = line
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((line, ""));

        let payload = if raw_payload.is_empty() {
            Value::Object(Default::default())
        } else {
            match serde_json::from_str(raw_payload) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("Invalid command payload '{}': {}", raw_payload, e);
                    let source = StatusSource::CommandLine(name.to_string());
                    self.push_status(StatusKind::Error, format!("Invalid JSON: {}", e), source);
                    return;
                }
            }
        };

        let outcome = self
            .dispatcher
            .dispatch_named(&mut self.store, name, &payload);
        if outcome.is_none() {
            let message = format!("'{}' had no effect", line);
            let source = StatusSource::CommandLine(name.to_string());
            self.push_status(StatusKind::Warning, message, source);
        }
        self.prefill_edit(outcome.as_ref());
    }

    fn retry_persist(&mut self) {
        if self.store.last_persist_error().is_none() {
            return;
        }
        if self.store.retry_persist() {
            self.push_status(StatusKind::Success, "Changes saved", StatusSource::Storage);
        }
    }

    fn push_status(&self, kind: StatusKind, message: impl Into<String>, source: StatusSource) {
        self.status
            .borrow_mut()
            .push(StatusMessage::new(kind, message, source));
    }
}

/// Text to pre-fill the edit input with
fn current_value(state: &AppState, target: &EditTarget) -> Option<String> {
    match target {
        EditTarget::List(id) => state.list(id).map(|l| l.name.clone()),
        EditTarget::Todo(todo) => {
            let list = state.selected_list()?;
            let index = list.position(todo)?;
            Some(list.todos[index].text.clone())
        }
    }
}

fn register_status_hooks(dispatcher: &mut Dispatcher, status: &Rc<RefCell<StatusBarState>>) {
    let push = |status: &Rc<RefCell<StatusBarState>>| {
        let status = Rc::clone(status);
        move |kind: StatusKind, message: String, action_type: ActionType| {
            status
                .borrow_mut()
                .push(StatusMessage::new(kind, message, StatusSource::Action(action_type)));
        }
    };

    let report = push(status);
    dispatcher.on(ActionType::AddList, move |outcome, _| {
        if let ActionOutcome::ListAdded { name, .. } = outcome {
            let message = format!("Created list '{}'", name);
            report(StatusKind::Success, message, outcome.action_type());
        }
    });

    let report = push(status);
    dispatcher.on(ActionType::EditList, move |outcome, _| {
        if let ActionOutcome::ListRenamed { name, .. } = outcome {
            let message = format!("Renamed list to '{}'", name);
            report(StatusKind::Success, message, outcome.action_type());
        }
    });

    let report = push(status);
    dispatcher.on(ActionType::DeleteList, move |outcome, _| {
        if let ActionOutcome::ListDeleted { name, .. } = outcome {
            let message = format!("Deleted list '{}'", name);
            report(StatusKind::Info, message, outcome.action_type());
        }
    });

    let report = push(status);
    dispatcher.on(ActionType::DeleteTodo, move |outcome, state| {
        let remaining = state.selected_list().map_or(0, |l| l.todos.len());
        let message = format!("Deleted todo, {} left", remaining);
        report(StatusKind::Info, message, outcome.action_type());
    });

    let report = push(status);
    dispatcher.on(ActionType::ToggleTodo, move |outcome, state| {
        if let ActionOutcome::TodoToggled { todo_id, completed } = outcome {
            let todo = TodoRef::Id(todo_id.clone());
            let text = state
                .selected_list()
                .and_then(|l| l.position(&todo).map(|i| l.todos[i].text.clone()))
                .unwrap_or_default();
            let verb = if *completed { "Completed" } else { "Reopened" };
            report(
                StatusKind::Success,
                format!("{} '{}'", verb, text),
                outcome.action_type(),
            );
        }
    });

    let report = push(status);
    dispatcher.on(ActionType::ChangeTheme, move |outcome, _| {
        if let ActionOutcome::ThemeChanged { theme } = outcome {
            let message = format!("Switched to {} theme", theme);
            report(StatusKind::Info, message, outcome.action_type());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::ThemeName;
    use crate::state::{Focus, UiMode};
    use crate::store::tests::{store_with, SharedBackend};
    use pretty_assertions::assert_eq;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn app_with(backend: &SharedBackend) -> App {
        App::new(store_with(backend), &AppConfig::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn latest_status(app: &App) -> Option<String> {
        app.status.borrow().latest().map(|m| m.message.clone())
    }

    #[test]
    fn test_loading_delay() {
        let config = AppConfig {
            loading_delay_ms: 500,
            ..AppConfig::default()
        };
        let store = Store::in_memory();
        // A fresh in-memory store starts in the loading phase
        assert!(store.state().loading);
        let mut app = App::new(store, &config);
        assert_eq!(app.store.state().ui_mode(), UiMode::Loading);

        app.tick(Instant::now());
        assert_eq!(app.store.state().ui_mode(), UiMode::Loading);

        app.tick(Instant::now() + Duration::from_secs(1));
        assert_eq!(app.store.state().ui_mode(), UiMode::Homepage);
    }

    #[test]
    fn test_create_list_and_todo_by_keyboard() {
        let backend = SharedBackend::default();
        let mut app = app_with(&backend);

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Groceries");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.state().ui_mode(), UiMode::List);
        assert_eq!(app.store.state().lists[0].name, "Groceries");
        assert!(app.ui.new_entry.is_empty());
        assert_eq!(latest_status(&app).as_deref(), Some("Created list 'Groceries'"));

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Milk");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Eggs");
        press(&mut app, KeyCode::Enter);

        let todos = &app.store.state().selected_list().unwrap().todos;
        assert_eq!(todos.len(), 2);
        assert_eq!(app.ui.focus, Focus::NewEntry);
        assert_eq!(app.ui.list_cursor, 1);
        assert_eq!(backend.stored().unwrap().lists[0].todos.len(), 2);
    }

    #[test]
    fn test_blank_new_entry_is_kept_out() {
        let backend = SharedBackend::default();
        let mut app = app_with(&backend);

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(app.store.state().lists.is_empty());
        assert_eq!(app.ui.new_entry, "   ");
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn test_edit_prefills_and_saves() {
        let backend = SharedBackend::default();
        let mut app = app_with(&backend);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Milk list");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Milk");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui.focus, Focus::Items);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.ui.edit_buffer, "Milk");
        type_text(&mut app, " (oat)");
        press(&mut app, KeyCode::Enter);

        let state = app.store.state();
        assert_eq!(state.selected_list().unwrap().todos[0].text, "Milk (oat)");
        assert_eq!(state.editing.todo, None);
    }

    #[test]
    fn test_empty_edit_cancels_without_commit() {
        let backend = SharedBackend::default();
        let mut app = app_with(&backend);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Work");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.store.state().ui_mode(), UiMode::Homepage);
        let writes = backend.writes();

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.ui.edit_buffer, "Work");
        for _ in 0..4 {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.state().lists[0].name, "Work");
        assert_eq!(app.store.state().editing.list, None);
        assert_eq!(backend.writes(), writes);
    }

    #[test]
    fn test_toggle_theme_by_keyboard() {
        let backend = SharedBackend::default();
        let mut app = app_with(&backend);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.store.state().theme, ThemeName::Light);
        assert_eq!(backend.stored().unwrap().theme, ThemeName::Light);
        assert_eq!(latest_status(&app).as_deref(), Some("Switched to light theme"));
    }

    #[test]
    fn test_command_line_dispatches_named_actions() {
        let backend = SharedBackend::default();
        let mut app = app_with(&backend);

        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, r#"ADD_LIST {"name": "Chores"}"#);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.state().lists[0].name, "Chores");

        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, "LAUNCH_ROCKET");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.state().lists.len(), 1);
        assert_eq!(
            latest_status(&app).as_deref(),
            Some("'LAUNCH_ROCKET' had no effect")
        );

        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, "ADD_TODO {oops");
        press(&mut app, KeyCode::Enter);
        assert!(latest_status(&app).unwrap().starts_with("Invalid JSON"));
        assert!(app.store.state().selected_list().unwrap().todos.is_empty());
    }

    #[test]
    fn test_back_home_ends_list_edit_started_elsewhere() {
        let backend = SharedBackend::default();
        let mut app = app_with(&backend);
        let id = app.store.add_list("Chores").unwrap();

        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, &format!(r#"BEGIN_EDITING {{"kind": "list", "id": "{}"}}"#, id));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.state().editing.list, Some(id));
        assert_eq!(app.ui.edit_buffer, "Chores");

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.store.state().ui_mode(), UiMode::Homepage);
        assert_eq!(app.store.state().editing.list, None);
        assert!(app.ui.edit_buffer.is_empty());

        // Typing on the homepage goes nowhere near the list name
        type_text(&mut app, "xyz");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.state().lists[0].name, "Chores");
    }

    #[test]
    fn test_storage_failure_and_retry() {
        let backend = SharedBackend::default();
        let mut app = app_with(&backend);
        backend.set_failing(true);

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Offline");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.state().lists.len(), 1);
        assert!(app.store.last_persist_error().is_some());

        backend.set_failing(false);
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(app.store.last_persist_error().is_none());
        assert_eq!(backend.stored().unwrap().lists[0].name, "Offline");
        assert_eq!(latest_status(&app).as_deref(), Some("Changes saved"));
    }

    #[test]
    fn test_quit() {
        let mut app = app_with(&SharedBackend::default());
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }
}
