//! Footer widget: key bindings and the last sounds played.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::presentation::view::MapView;

const KEYS: &str = "arrows/wasd move  z/enter A  x/esc B  space start  tab select  q quit";

pub fn render(frame: &mut Frame, area: Rect, view: &MapView) {
    let sounds = view
        .sounds
        .iter()
        .map(|sound| sound.as_ref())
        .collect::<Vec<_>>()
        .join(" ");

    let lines = vec![
        Line::from(Span::styled(KEYS, Style::default().fg(Color::DarkGray))),
        Line::from(vec![
            Span::styled("sound: ", Style::default().fg(Color::DarkGray)),
            Span::styled(sounds, Style::default().fg(Color::LightBlue)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}
