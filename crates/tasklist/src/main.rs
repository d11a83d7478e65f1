use anyhow::Result;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use tasklist_config::{AppConfig, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

mod actions;
mod app;
mod dispatcher;
mod domain_models;
mod error;
mod hooks;
mod keyboard;
mod logger;
mod persistence;
mod state;
mod store;
mod view_models;
mod views;

use app::App;
use store::Store;

fn main() -> Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting tasklist (log file {})", log_file.display());

    let config = AppConfig::load();
    let store = Store::load(open_backend(&config), config.storage_key.clone());
    let mut app = App::new(store, &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("Exiting with error: {:#}", err);
    } else {
        log::info!("Exiting tasklist");
    }
    result
}

/// File-backed storage, or memory only when the file cannot be used
fn open_backend(config: &AppConfig) -> Box<dyn KeyValueStore> {
    let opened = config
        .resolved_storage_path()
        .and_then(|path| FileKeyValueStore::open(path).map_err(anyhow::Error::from));

    match opened {
        Ok(store) => {
            log::info!("Persisting to {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::warn!("Storage unavailable ({:#}), changes will not survive a restart", e);
            Box::new(MemoryKeyValueStore::new())
        }
    }
}
