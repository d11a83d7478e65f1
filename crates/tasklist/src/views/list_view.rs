use crate::view_models::ListDetailViewModel;
use crate::views::{homepage_view::render_input, scroll_offset};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tasklist_theme::Theme;

/// Todos of the selected list with checkboxes
pub fn render(vm: &ListDetailViewModel, theme: &Theme, area: Rect, f: &mut Frame) {
    let [input_area, rows_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    render_input(&vm.input, theme, input_area, f);

    let block = Block::default()
        .title(vm.title.clone())
        .title_bottom(Line::from(format!(" {} ", vm.progress)).alignment(Alignment::Right))
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
                    Span::styled(format!("{} ", row.checkbox), theme.text()),
                    Span::styled(row.text.clone(), row.style),
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
