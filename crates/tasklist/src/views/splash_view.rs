use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tasklist_theme::Theme;

/// Static placeholder shown while the startup delay runs
pub fn render(theme: &Theme, area: Rect, f: &mut Frame) {
    f.render_widget(Block::default().style(theme.panel_background()), area);

    let [_, center, _] = Layout::vertical([
        Constraint::Percentage(45),
        Constraint::Length(3),
        Constraint::Percentage(45),
    ])
    .areas(area);

    let lines = vec![
        Line::from(Span::styled("tasklist", theme.panel_title().bold())),
        Line::from(""),
        Line::from(Span::styled("Loading...", theme.text().dim())),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(theme.panel_background()),
        center,
    );
}
