//! Read-only world data the region map consults.
//!
//! Static tables (section metadata, region grids, dungeon descriptors, fly
//! destinations) and save-data views (overworld position, visitation) are
//! exposed as oracles. [`RegionMapEnv`] bundles them so the session can reach
//! everything without coupling to concrete implementations.
mod dungeon;
mod fly;
mod lookup;
mod overworld;
mod progress;
mod section;

pub use dungeon::{DungeonDescriptor, DungeonOracle, PreviewAssets};
pub use fly::{FlyDestination, FlyOracle, WarpRequest, resolve_fly_destination};
pub use lookup::{MapSectionLookup, RegionLayout};
pub use overworld::{MapKind, MapLocation, OverworldOracle, PlayerAvatar};
pub use progress::{ProgressOracle, VisitLog};
pub use section::{SectionMetadata, SectionTable, Span};

use crate::types::{Layer, Position, Region, SectionId, SectionType};

/// Aggregates the oracles a session reads every tick.
#[derive(Clone, Copy)]
pub struct RegionMapEnv<'a> {
    pub lookup: &'a MapSectionLookup,
    pub dungeons: &'a dyn DungeonOracle,
    pub fly: &'a dyn FlyOracle,
    pub overworld: &'a dyn OverworldOracle,
    pub progress: &'a dyn ProgressOracle,
}

impl<'a> RegionMapEnv<'a> {
    pub fn new(
        lookup: &'a MapSectionLookup,
        dungeons: &'a dyn DungeonOracle,
        fly: &'a dyn FlyOracle,
        overworld: &'a dyn OverworldOracle,
        progress: &'a dyn ProgressOracle,
    ) -> Self {
        Self {
            lookup,
            dungeons,
            fly,
            overworld,
            progress,
        }
    }

    /// Section occupying `position` of `layer`.
    pub fn section_at(&self, region: Region, layer: Layer, position: Position) -> SectionId {
        self.lookup.section_at(region, layer, position.y, position.x)
    }

    /// Visitation type of `section`; empty cells are always [`SectionType::None`].
    pub fn section_type(&self, layer: Layer, section: SectionId) -> SectionType {
        if section.is_none() {
            SectionType::None
        } else {
            self.progress.section_type(layer, section)
        }
    }
}
