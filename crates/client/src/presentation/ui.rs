//! Composes the widgets into one terminal frame.
use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use region_map_core::RegionMapConfig;

use crate::presentation::{terminal::Tui, view::MapView, widgets};

/// Two columns per cell plus the borders.
const MAP_COLUMNS: u16 = RegionMapConfig::MAP_WIDTH as u16 * 2 + 2;

pub fn render(terminal: &mut Tui, view: &MapView) -> Result<()> {
    terminal.draw(|frame| {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                                        // Header
                Constraint::Length(RegionMapConfig::MAP_HEIGHT as u16 + 2), // Map
                Constraint::Length(2),                                        // Footer
                Constraint::Min(0),
            ])
            .split(frame.area());

        widgets::header::render(frame, rows[0], view);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MAP_COLUMNS), Constraint::Min(20)])
            .split(rows[1]);
        widgets::map_grid::render(frame, columns[0], view);
        widgets::side_panel::render(frame, columns[1], view);

        widgets::footer::render(frame, rows[2], view);
    })?;

    Ok(())
}
