//! Map grid widget: one character per cell plus the switch and cancel buttons.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use region_map_core::{Position, RegionMapConfig};

use crate::presentation::{theme, view::MapView};

pub fn render(frame: &mut Frame, area: Rect, view: &MapView) {
    let block = Block::default().borders(Borders::ALL).title(" Map ");

    if view.blanked {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    }

    let lines: Vec<Line> = view
        .cells
        .iter()
        .enumerate()
        .map(|(y, row)| {
            let spans = row.iter().enumerate().map(|(x, cell)| {
                let position = Position::new(x as i32, y as i32);
                let (glyph, style) = match button(view, position) {
                    Some(label) if !cell.marker => {
                        let mut style = Style::default().fg(Color::Black).bg(Color::Gray);
                        if cell.cursor {
                            style = style.bg(Color::Red).add_modifier(Modifier::BOLD);
                        }
                        (label, style)
                    }
                    _ => theme::cell(cell),
                };
                Span::styled(format!("{glyph} "), dim(style, view.darkness))
            });
            Line::from(spans.collect::<Vec<_>>())
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn button(view: &MapView, position: Position) -> Option<char> {
    if position == RegionMapConfig::CANCEL_CELL {
        Some('X')
    } else if view.switch_button && position == RegionMapConfig::SWITCH_CELL {
        Some('S')
    } else {
        None
    }
}

/// Blend darkness past the overlay level reads as a dimmed map.
fn dim(style: Style, darkness: u8) -> Style {
    if darkness >= RegionMapConfig::SWITCH_MENU_DIM_LEVEL {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}
