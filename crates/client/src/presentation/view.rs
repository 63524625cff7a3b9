//! Frame-by-frame snapshot of what the region map shows.
//!
//! Widgets read a [`MapView`] only; it is rebuilt from the session and the
//! virtual display after every tick.

use region_map_core::display::{
    Background, HelpSlot, HelpText, NameWindow, SoundCue, SpriteSheet, TextColor,
};
use region_map_core::{
    DisplayDriver, Layer, Overlay, Permissions, Position, PresentationMode, Region,
    RegionMapConfig, RegionMapEnv, RegionMapSession, SectionType, VirtualDisplay,
};

/// Sounds kept for the footer.
const RECENT_SOUNDS: usize = 4;

/// What a single grid cell shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellView {
    pub surface: SectionType,
    pub dungeon: SectionType,
    pub fly_icon: bool,
    pub dungeon_icon: bool,
    pub marker: bool,
    pub cursor: bool,
}

/// Open overlay, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayView {
    SwitchMenu { selection: Region },
    DungeonPreview { name: String, description: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapView {
    pub mode: PresentationMode,
    pub region: Region,
    pub phase: &'static str,
    pub task: &'static str,
    /// Map layer hidden or faded to black.
    pub blanked: bool,
    pub darkness: u8,
    pub cells: Vec<[CellView; RegionMapConfig::MAP_WIDTH as usize]>,
    pub switch_button: bool,
    pub map_name: Option<String>,
    pub dungeon_name: Option<(String, TextColor)>,
    pub help: (HelpText, HelpText),
    pub overlay: Option<OverlayView>,
    pub sounds: Vec<SoundCue>,
}

impl MapView {
    pub fn build(
        session: &RegionMapSession,
        display: &VirtualDisplay,
        env: &RegionMapEnv<'_>,
        sounds: &[SoundCue],
    ) -> Self {
        let scene = session.scene();
        let region = scene.active_region();

        let mut cells = vec![[CellView::default(); RegionMapConfig::MAP_WIDTH as usize]; RegionMapConfig::MAP_HEIGHT as usize];
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                let position = Position::new(x as i32, y as i32);
                cell.surface = env.section_type(Layer::Surface, env.section_at(region, Layer::Surface, position));
                cell.dungeon = env.section_type(Layer::Dungeon, env.section_at(region, Layer::Dungeon, position));
            }
        }

        let icons = scene.icons();
        for icon in icons.fly_icons().iter().filter(|icon| icon.is_visible() && icon.region == region) {
            if let Some(cell) = cell_mut(&mut cells, icon.position) {
                cell.fly_icon = true;
            }
        }
        for icon in icons.dungeon_icons().iter().filter(|icon| icon.is_visible() && icon.region == region) {
            if let Some(cell) = cell_mut(&mut cells, icon.position) {
                cell.dungeon_icon = true;
            }
        }

        let marker = scene.marker();
        if marker.is_visible() && marker.region() == region {
            if let Some(cell) = cell_mut(&mut cells, marker.position()) {
                cell.marker = true;
            }
        }
        if display.visible_sprites(SpriteSheet::Cursor).next().is_some() {
            if let Some(cell) = cell_mut(&mut cells, scene.cursor().position()) {
                cell.cursor = true;
            }
        }

        let overlay = session.overlay().map(|overlay| match overlay {
            Overlay::SwitchMenu(menu) => OverlayView::SwitchMenu {
                selection: menu.selection(),
            },
            Overlay::DungeonPreview(preview) => OverlayView::DungeonPreview {
                name: preview.descriptor().name.clone(),
                description: display
                    .preview_text()
                    .map(|(_, description)| description.to_string()),
            },
        });

        let start = sounds.len().saturating_sub(RECENT_SOUNDS);

        Self {
            mode: session.mode(),
            region,
            phase: session.phase().as_str(),
            task: session.active_task().map(|task| task.as_str()).unwrap_or("none"),
            blanked: display.is_faded_out() || !display.background(Background::Map).visible,
            darkness: display.registers().darkness,
            cells,
            switch_button: scene.permissions().contains(Permissions::SWITCH_BUTTON),
            map_name: display
                .name(NameWindow::Map)
                .map(|(name, _)| name.trim_end().to_string())
                .filter(|name| !name.is_empty()),
            dungeon_name: display
                .name(NameWindow::Dungeon)
                .map(|(name, color)| (name.trim_end().to_string(), color))
                .filter(|(name, _)| !name.is_empty()),
            help: (display.help(HelpSlot::Left), display.help(HelpSlot::Right)),
            overlay,
            sounds: sounds[start..].to_vec(),
        }
    }

    pub fn cell(&self, position: Position) -> Option<&CellView> {
        self.cells
            .get(usize::try_from(position.y).ok()?)?
            .get(usize::try_from(position.x).ok()?)
    }
}

fn cell_mut(
    cells: &mut [[CellView; RegionMapConfig::MAP_WIDTH as usize]],
    position: Position,
) -> Option<&mut CellView> {
    cells
        .get_mut(usize::try_from(position.y).ok()?)?
        .get_mut(usize::try_from(position.x).ok()?)
}
