//! Side panel: name windows and whichever overlay is open.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use region_map_core::Region;

use crate::presentation::{
    theme,
    view::{MapView, OverlayView},
};

pub fn render(frame: &mut Frame, area: Rect, view: &MapView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_names(frame, chunks[0], view);

    match &view.overlay {
        Some(OverlayView::SwitchMenu { selection }) => render_switch_menu(frame, chunks[1], *selection),
        Some(OverlayView::DungeonPreview { name, description }) => {
            render_preview(frame, chunks[1], name, description.as_deref())
        }
        None => render_legend(frame, chunks[1]),
    }
}

fn render_names(frame: &mut Frame, area: Rect, view: &MapView) {
    let map_name = view.map_name.clone().unwrap_or_default();
    let mut lines = vec![Line::from(Span::styled(map_name, Style::default().fg(Color::White)))];
    if let Some((name, color)) = &view.dungeon_name {
        lines.push(Line::from(Span::styled(
            name.clone(),
            Style::default().fg(theme::text_color(*color)),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Location "));
    frame.render_widget(paragraph, area);
}

fn render_switch_menu(frame: &mut Frame, area: Rect, selection: Region) {
    let lines: Vec<Line> = Region::ALL
        .iter()
        .map(|region| {
            let label = region.as_ref().to_uppercase();
            if *region == selection {
                Line::from(Span::styled(
                    format!("> {label}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {label}"))
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Switch region "));
    frame.render_widget(paragraph, area);
}

fn render_preview(frame: &mut Frame, area: Rect, name: &str, description: Option<&str>) {
    let mut lines = vec![Line::from(Span::styled(
        name.to_string(),
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(description) = description {
        lines.push(Line::from(""));
        lines.push(Line::from(description.to_string()));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Dungeon guide "));
    frame.render_widget(paragraph, area);
}

fn render_legend(frame: &mut Frame, area: Rect) {
    let entries = [
        ("@", "you", Color::Yellow),
        ("#", "town", Color::LightGreen),
        ("=", "route", Color::Gray),
        ("D", "dungeon", Color::LightMagenta),
        ("F", "fly", Color::LightCyan),
        ("S", "switch", Color::Gray),
        ("X", "cancel", Color::Gray),
    ];
    let lines: Vec<Line> = entries
        .iter()
        .map(|(glyph, label, color)| {
            Line::from(vec![
                Span::styled(*glyph, Style::default().fg(*color)),
                Span::raw(format!(" {label}")),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Legend "));
    frame.render_widget(paragraph, area);
}
