//! The player's own position marker.

use crate::config::RegionMapConfig;
use crate::display::{DisplayDriver, SpriteHandle, SpriteSheet};
use crate::env::{MapKind, MapLocation, OverworldOracle, PlayerAvatar, RegionMapEnv, Span};
use crate::types::{Position, Region, ScreenPos, SectionId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerMarker {
    position: Position,
    section: SectionId,
    region: Region,
    visible: bool,
    sprite: Option<SpriteHandle>,
}

impl PlayerMarker {
    /// Locates the player on the region map from save data.
    pub fn init_from_overworld_position(env: &RegionMapEnv<'_>) -> Self {
        let kind = env.overworld.current_map_kind();
        let location = source_location(kind, env.overworld);
        let (origin, span) = env.lookup.origin_and_span(location.section);
        let position = grid_position(&location, origin, span);
        let region = env.lookup.home_region(location.section).unwrap_or_default();

        tracing::debug!(
            %kind,
            section = %location.section,
            ?position,
            %region,
            "player marker located"
        );

        Self {
            position,
            section: location.section,
            region,
            visible: false,
            sprite: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn section(&self) -> SectionId {
        self.section
    }

    /// Region whose grid contains the marker.
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn screen_position(&self) -> ScreenPos {
        let cell = |c: i32| (c as i16) * RegionMapConfig::CELL_PX + RegionMapConfig::CURSOR_ORIGIN_PX;
        ScreenPos::new(cell(self.position.x), cell(self.position.y))
    }

    pub fn spawn(&mut self, avatar: PlayerAvatar, driver: &mut dyn DisplayDriver) {
        let sprite = driver.create_sprite(SpriteSheet::PlayerMarker(avatar), self.screen_position(), 2);
        driver.set_sprite_visible(sprite, self.visible);
        self.sprite = Some(sprite);
    }

    pub fn set_visible(&mut self, visible: bool, driver: &mut dyn DisplayDriver) {
        self.visible = visible;
        if let Some(sprite) = self.sprite {
            driver.set_sprite_visible(sprite, visible);
        }
    }

    pub fn despawn(&mut self, driver: &mut dyn DisplayDriver) {
        if let Some(sprite) = self.sprite.take() {
            driver.destroy_sprite(sprite);
        }
        self.visible = false;
    }
}

/// Picks the saved position that describes where the player is on the map.
///
/// Outdoor kinds use the live position, caves use the escape warp, secret
/// bases the dynamic warp. Indoor maps keep their own section and take the
/// escape warp's coordinates unless the section is the placeholder, in which
/// case the dynamic warp supplies both.
pub fn source_location(kind: MapKind, overworld: &dyn OverworldOracle) -> MapLocation {
    match kind {
        MapKind::Town | MapKind::City | MapKind::Route | MapKind::Underwater | MapKind::OceanRoute => {
            overworld.current_location()
        }
        MapKind::Underground | MapKind::Unknown => overworld.escape_warp_location(),
        MapKind::SecretBase => overworld.dynamic_warp_location(),
        MapKind::Indoor => {
            let current = overworld.current_location();
            if current.section != SectionId::PLACEHOLDER {
                MapLocation {
                    section: current.section,
                    ..overworld.escape_warp_location()
                }
            } else {
                overworld.dynamic_warp_location()
            }
        }
    }
}

/// Scales a map-local position into the section's cells and offsets it by the section origin.
pub fn grid_position(location: &MapLocation, origin: Position, span: Span) -> Position {
    let axis = |raw: i16, extent: u16, cells: u8| -> i32 {
        let cells = i32::from(cells.max(1));
        let divisor = (i32::from(extent) / cells).max(1);
        (i32::from(raw) / divisor).clamp(0, cells - 1)
    };

    Position::new(
        origin.x + axis(location.x, location.width, span.width),
        origin.y + axis(location.y, location.height, span.height),
    )
}
