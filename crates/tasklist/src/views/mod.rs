//! Views
//!
//! Everything on screen is re-derived from the store state and the UI-local
//! state on every draw. Nothing here is kept between frames.

use crate::state::{AppState, StatusBarState, UiMode, UiState};
use crate::store::Store;
use crate::view_models::{
    FooterViewModel, HomepageViewModel, ListDetailViewModel, StatusBarViewModel,
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tasklist_theme::Theme;

pub mod homepage_view;
pub mod list_view;
pub mod splash_view;
pub mod status_bar;

pub use status_bar::StatusBarWidget;

/// Render the entire application UI
pub fn render(store: &Store, ui: &UiState, status: &StatusBarState, f: &mut Frame) {
    let state = store.state();
    let theme = state.theme.palette();
    let area = f.area();

    if state.ui_mode() == UiMode::Loading {
        splash_view::render(&theme, area, f);
        return;
    }

    f.render_widget(Block::default().style(theme.panel_background()), area);

    let [header_area, body_area, footer_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(state, &theme, header_area, f);

    match ListDetailViewModel::from_state(state, ui) {
        Some(vm) => list_view::render(&vm, &theme, body_area, f),
        None => {
            let vm = HomepageViewModel::from_state(state, ui);
            homepage_view::render(&vm, &theme, body_area, f);
        }
    }

    render_footer(&FooterViewModel::from_state(state, ui), &theme, footer_area, f);

    let status_vm = StatusBarViewModel::from_state(status, store.last_persist_error(), &theme);
    f.render_widget(StatusBarWidget(&status_vm), status_area);
}

/// First row to draw so that `cursor` stays within `visible` rows
pub(crate) fn scroll_offset(cursor: usize, visible: usize) -> usize {
    cursor.saturating_sub(visible.saturating_sub(1))
}

fn render_header(state: &AppState, theme: &Theme, area: Rect, f: &mut Frame) {
    let location = match state.selected_list() {
        Some(list) => format!(" tasklist › {}", list.name),
        None => " tasklist".to_string(),
    };
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(14)]).areas(area);

    f.render_widget(
        Paragraph::new(Span::styled(location, theme.panel_title().bold())),
        left,
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("t ", theme.key_hint()),
            Span::styled(format!("{} theme", state.theme), theme.key_description()),
        ])),
        right,
    );
}

fn render_footer(vm: &FooterViewModel, theme: &Theme, area: Rect, f: &mut Frame) {
    let line = match vm {
        FooterViewModel::CommandLine(text) => Line::from(vec![
            Span::styled(":", theme.key_hint().bold()),
            Span::styled(format!("{}▏", text), theme.input_focused()),
        ]),
        FooterViewModel::Hints(hints) => Line::from(
            hints
                .iter()
                .flat_map(|h| {
                    [
                        Span::styled(format!(" {}", h.keys), theme.key_hint().bold()),
                        Span::styled(format!(" {} ", h.description), theme.key_description()),
                    ]
                })
                .collect::<Vec<_>>(),
        ),
    };

    f.render_widget(Paragraph::new(line), area);
}
