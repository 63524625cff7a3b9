//! Everything on screen while a region map is open.
//!
//! The session owns one [`MapScene`] and lends it to whichever machine is
//! receiving ticks: the main loop, the edge animation or an overlay.

use super::Permissions;
use super::layout::LayoutBuffers;
use crate::cursor::{Cursor, CursorControls, SnapTargets};
use crate::display::{
    Background, DisplayDriver, HelpText, NameWindow, RegisterSlots, SoundCue, SpriteHandle,
    SpriteSheet, TextColor,
};
use crate::env::RegionMapEnv;
use crate::icons::RegionIcons;
use crate::marker::PlayerMarker;
use crate::names::map_name;
use crate::types::{Layer, Region, RegionFilter, SectionId, SectionType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapScene {
    pub(crate) permissions: Permissions,
    pub(crate) active_region: Region,
    pub(crate) cursor: Cursor,
    pub(crate) cursor_sprite: Option<SpriteHandle>,
    pub(crate) marker: PlayerMarker,
    pub(crate) icons: RegionIcons,
    pub(crate) layouts: LayoutBuffers,
    pub(crate) slots: RegisterSlots,
}

impl MapScene {
    pub(crate) fn new(permissions: Permissions, marker: PlayerMarker, layouts: LayoutBuffers, env: &RegionMapEnv<'_>) -> Self {
        let active_region = marker.region();
        let cursor = Cursor::new(marker.position(), env, active_region);
        Self {
            permissions,
            active_region,
            cursor,
            cursor_sprite: None,
            marker,
            icons: RegionIcons::default(),
            layouts,
            slots: RegisterSlots::new(),
        }
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    pub fn active_region(&self) -> Region {
        self.active_region
    }

    /// Region the player's marker belongs to.
    pub fn home_region(&self) -> Region {
        self.marker.region()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn marker(&self) -> &PlayerMarker {
        &self.marker
    }

    pub fn icons(&self) -> &RegionIcons {
        &self.icons
    }

    pub fn register_slots(&self) -> &RegisterSlots {
        &self.slots
    }

    pub(crate) fn spawn_cursor(&mut self, visible: bool, driver: &mut dyn DisplayDriver) {
        let sprite = driver.create_sprite(SpriteSheet::Cursor, self.cursor.screen_position(), 0);
        driver.set_sprite_visible(sprite, visible);
        self.cursor_sprite = Some(sprite);
    }

    pub(crate) fn set_cursor_visible(&mut self, visible: bool, driver: &mut dyn DisplayDriver) {
        if let Some(sprite) = self.cursor_sprite {
            driver.set_sprite_visible(sprite, visible);
        }
    }

    /// Moves the cursor sprite to the cursor's current screen position.
    pub(crate) fn sync_cursor_sprite(&self, driver: &mut dyn DisplayDriver) {
        if let Some(sprite) = self.cursor_sprite {
            driver.move_sprite(sprite, self.cursor.screen_position());
        }
    }

    pub(crate) fn snap_targets(&self) -> SnapTargets {
        SnapTargets {
            player: (self.active_region == self.home_region()).then(|| self.marker.position()),
            switch_button: self.permissions.contains(Permissions::SWITCH_BUTTON),
        }
    }

    pub(crate) fn cursor_controls(&self, select_cancels: bool) -> CursorControls {
        CursorControls {
            permissions: self.permissions,
            snap: self.snap_targets(),
            select_cancels,
        }
    }

    /// Buffers `region`'s layout into the map background.
    pub(crate) fn buffer_region(&mut self, region: Region, driver: &mut dyn DisplayDriver) {
        let switch_button = self.permissions.contains(Permissions::SWITCH_BUTTON);
        driver.load_tilemap(Background::Map, self.layouts.scroll_buffer(region, switch_button));
    }

    pub(crate) fn show_backgrounds(&self, driver: &mut dyn DisplayDriver) {
        for background in [Background::Map, Background::Text, Background::Frame] {
            driver.show_background(background, true);
        }
    }

    /// Makes `region` the displayed region and re-reads the cursor caches.
    ///
    /// Icons of every other region are hidden and the player marker is shown
    /// only when `region` is the player's own.
    pub(crate) fn switch_to(&mut self, region: Region, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) {
        self.active_region = region;
        self.cursor.refresh(env, region);
        self.buffer_region(region, driver);
        self.icons.show_only(region, driver);
        self.marker.set_visible(region == self.home_region(), driver);
        tracing::debug!(%region, "active region changed");
    }

    pub(crate) fn reveal_region_icons(&mut self, driver: &mut dyn DisplayDriver) {
        self.icons.set_visibility(RegionFilter::Only(self.active_region), true, driver);
    }

    pub(crate) fn display_map_name(&self, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) {
        let section = self.cursor.section(Layer::Surface);
        if section.is_none() {
            driver.clear_name(NameWindow::Map);
        } else {
            driver.print_name(NameWindow::Map, &map_name(env.lookup, section, 0), TextColor::White);
        }
    }

    pub(crate) fn display_dungeon_name(&self, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) {
        let section = self.cursor.section(Layer::Dungeon);
        if section.is_none() {
            driver.clear_name(NameWindow::Dungeon);
            return;
        }
        let color = if self.cursor.section_type(Layer::Dungeon) == SectionType::Visited {
            TextColor::Green
        } else {
            TextColor::Red
        };
        driver.print_name(NameWindow::Dungeon, env.lookup.name(section).unwrap_or_default(), color);
    }

    pub(crate) fn display_names(&self, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) {
        self.display_map_name(env, driver);
        self.display_dungeon_name(env, driver);
    }

    pub(crate) fn clear_names(&self, driver: &mut dyn DisplayDriver) {
        driver.clear_name(NameWindow::Map);
        driver.clear_name(NameWindow::Dungeon);
    }

    /// Sound for arriving on a cell; placeholder sections are silent.
    pub(crate) fn move_end_sound(&self, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) {
        let surface = env.section_at(self.active_region, Layer::Surface, self.cursor.position());
        if surface == SectionId::PLACEHOLDER {
            return;
        }
        if self.cursor.section_type(Layer::Surface).is_notable()
            || self.cursor.section_type(Layer::Dungeon).is_notable()
        {
            driver.play_sound(SoundCue::Scroll);
        }
        if (self.cursor.is_on_switch() && self.permissions.contains(Permissions::SWITCH_BUTTON))
            || self.cursor.is_on_cancel()
        {
            driver.play_sound(SoundCue::ButtonHover);
        }
    }

    /// Right-hand help text for the cell under the cursor.
    pub(crate) fn move_end_help(&self) -> Option<HelpText> {
        if !self.cursor.section(Layer::Dungeon).is_none() {
            if !self.permissions.contains(Permissions::MAP_PREVIEW) {
                return None;
            }
            return Some(if self.cursor.section_type(Layer::Dungeon) == SectionType::Visited {
                HelpText::AButtonGuide
            } else {
                HelpText::Blank
            });
        }
        Some(if self.cursor.is_on_switch() && self.permissions.contains(Permissions::SWITCH_BUTTON) {
            HelpText::AButtonSwitch
        } else if self.cursor.is_on_cancel() {
            HelpText::AButtonCancel
        } else {
            HelpText::Blank
        })
    }

    /// Destroys every sprite the scene created.
    pub(crate) fn despawn(&mut self, driver: &mut dyn DisplayDriver) {
        if let Some(sprite) = self.cursor_sprite.take() {
            driver.destroy_sprite(sprite);
        }
        self.marker.despawn(driver);
        self.icons.despawn(driver);
    }
}
