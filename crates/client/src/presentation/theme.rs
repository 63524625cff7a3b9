//! Glyphs and colours for the region map grid.
use ratatui::style::{Color, Modifier, Style};
use region_map_core::SectionType;
use region_map_core::display::{HelpText, TextColor};

use crate::presentation::view::CellView;

/// Glyph and style for one grid cell, top layer first.
pub fn cell(cell: &CellView) -> (char, Style) {
    let (glyph, mut style) = if cell.marker {
        ('@', Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else if cell.dungeon_icon {
        let color = if cell.dungeon == SectionType::Visited {
            Color::LightMagenta
        } else {
            Color::DarkGray
        };
        ('D', Style::default().fg(color))
    } else if cell.fly_icon {
        ('F', Style::default().fg(Color::LightCyan))
    } else {
        surface(cell.surface)
    };

    if cell.cursor {
        style = style.bg(Color::Red).add_modifier(Modifier::BOLD);
    }
    (glyph, style)
}

fn surface(section_type: SectionType) -> (char, Style) {
    match section_type {
        SectionType::None => ('.', Style::default().fg(Color::Blue)),
        SectionType::Route => ('=', Style::default().fg(Color::Gray)),
        SectionType::Visited => ('#', Style::default().fg(Color::LightGreen)),
        SectionType::NotVisited => ('#', Style::default().fg(Color::DarkGray)),
        SectionType::Unknown => ('?', Style::default().fg(Color::Gray)),
    }
}

pub fn text_color(color: TextColor) -> Color {
    match color {
        TextColor::White => Color::White,
        TextColor::Green => Color::LightGreen,
        TextColor::Red => Color::LightRed,
    }
}

/// Top bar caption for a help prompt.
pub fn help_caption(help: HelpText) -> &'static str {
    match help {
        HelpText::Blank => "",
        HelpText::DPadMove => "+ Move",
        HelpText::UpDownPick => "Up/Down Pick",
        HelpText::AButtonGuide => "A Guide",
        HelpText::AButtonSwitch => "A Switch",
        HelpText::AButtonCancel => "A Cancel",
        HelpText::AButtonOk => "A OK",
        HelpText::AnyButtonClose => "Any button: close",
    }
}
