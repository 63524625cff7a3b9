//! Header widget: top bar help prompts and the session's phase.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::{theme, view::MapView};

pub fn render(frame: &mut Frame, area: Rect, view: &MapView) {
    let (left, right) = view.help;
    let text = vec![Line::from(vec![
        Span::styled(
            view.region.as_ref().to_uppercase(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(theme::help_caption(left), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(theme::help_caption(right), Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("  [{} | {}]", view.phase, view.task),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Region map ({}) ", view.mode)),
    );

    frame.render_widget(paragraph, area);
}
