//! Homepage View
//!
//! "New list" input on top, lists below with their todo counts.

use crate::view_models::{HomepageViewModel, InputViewModel};
use crate::views::scroll_offset;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tasklist_theme::Theme;

pub fn render(vm: &HomepageViewModel, theme: &Theme, area: Rect, f: &mut Frame) {
    let [input_area, rows_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    render_input(&vm.input, theme, input_area, f);

    let block = Block::default()
        .title(vm.title.clone())
        .borders(Borders::ALL)
        .border_style(theme.panel_border())
        .title_style(theme.panel_title());

    let visible = block.inner(rows_area).height as usize;
    let offset = scroll_offset(vm.cursor_row, visible);

    let lines: Vec<Line> = match vm.empty_message {
        Some(message) => vec![Line::from(Span::styled(message, theme.muted().italic()))],
        None => vm
            .rows
            .iter()
            .skip(offset)
            .take(visible)
            .map(|row| {
                let marker = if row.is_editing {
                    "✎ "
                } else if row.is_cursor {
                    "▶ "
                } else {
                    "  "
                };
                Line::from(vec![
                    Span::styled(marker, theme.key_hint()),
                    Span::styled(row.text.clone(), row.style),
                    Span::raw("  "),
                    Span::styled(row.summary.clone(), row.summary_style),
                ])
            })
            .collect(),
    };

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(theme.panel_background()),
        rows_area,
    );
}

/// Bordered single-line input, shared with the list view
pub(crate) fn render_input(vm: &InputViewModel, theme: &Theme, area: Rect, f: &mut Frame) {
    let border_style = if vm.focused {
        theme.key_hint()
    } else {
        theme.panel_border()
    };
    let block = Block::default()
        .title(format!(" {} ", vm.label))
        .borders(Borders::ALL)
        .border_style(border_style)
        .title_style(theme.panel_title());

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(vm.display_text.clone(), vm.style)))
            .block(block)
            .style(theme.panel_background()),
        area,
    );
}
