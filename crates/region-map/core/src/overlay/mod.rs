//! Modal screens that borrow the map scene: the region switch menu and the
//! dungeon preview.
//!
//! An overlay saves the map's blend registers when it opens and puts them
//! back when it closes. While it runs, the session forwards every tick to it
//! and the main loop is suspended.
mod dungeon_preview;
mod switch_menu;

pub use dungeon_preview::{DungeonPreviewOverlay, FlavorStep, PreviewStep, PreviewZoom};
pub use switch_menu::{RegionSwitchMenu, SwitchOutcome, SwitchStep};

use crate::display::DisplayDriver;
use crate::env::RegionMapEnv;
use crate::input::InputFrame;
use crate::session::MapScene;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayStatus {
    Running,
    Closed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Overlay {
    SwitchMenu(RegionSwitchMenu),
    DungeonPreview(DungeonPreviewOverlay),
}

impl Overlay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Overlay::SwitchMenu(_) => "switch_menu",
            Overlay::DungeonPreview(_) => "dungeon_preview",
        }
    }

    pub fn tick(
        &mut self,
        input: &InputFrame,
        scene: &mut MapScene,
        env: &RegionMapEnv<'_>,
        driver: &mut dyn DisplayDriver,
    ) -> OverlayStatus {
        match self {
            Overlay::SwitchMenu(menu) => menu.tick(input, scene, env, driver),
            Overlay::DungeonPreview(preview) => preview.tick(input, scene, env, driver),
        }
    }
}
