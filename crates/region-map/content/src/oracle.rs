//! Table-backed dungeon and fly oracles.

use std::collections::BTreeMap;

use region_map_core::display::AssetId;
use region_map_core::palette::Rgb555;
use region_map_core::{
    DungeonDescriptor, DungeonOracle, FlyDestination, FlyOracle, PreviewAssets, SectionId,
};

use crate::tables::{dungeon_descriptors, fly_destinations, section_name};

const PREVIEW_PALETTE_LEN: usize = 16;

/// Dungeon descriptors, preview assets and fly destinations held in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticContent {
    dungeons: BTreeMap<SectionId, DungeonDescriptor>,
    previews: BTreeMap<SectionId, PreviewAssets>,
    fly: BTreeMap<SectionId, FlyDestination>,
}

impl StaticContent {
    /// Builds the oracle from descriptor and fly tables.
    ///
    /// Every described dungeon gets the preview assets registered under its own id.
    pub fn new(
        dungeons: impl IntoIterator<Item = DungeonDescriptor>,
        fly: impl IntoIterator<Item = (SectionId, FlyDestination)>,
    ) -> Self {
        let dungeons: BTreeMap<_, _> = dungeons
            .into_iter()
            .map(|descriptor| (descriptor.section, descriptor))
            .collect();
        let previews = dungeons
            .keys()
            .map(|section| (*section, preview_assets(*section)))
            .collect();
        Self {
            dungeons,
            previews,
            fly: fly.into_iter().collect(),
        }
    }

    /// The tables compiled into this crate.
    pub fn builtin() -> Self {
        Self::new(dungeon_descriptors(section_name), fly_destinations())
    }

    pub fn dungeons(&self) -> impl Iterator<Item = &DungeonDescriptor> {
        self.dungeons.values()
    }

    pub fn fly_destinations(&self) -> impl Iterator<Item = (SectionId, FlyDestination)> + '_ {
        self.fly.iter().map(|(section, destination)| (*section, *destination))
    }
}

impl DungeonOracle for StaticContent {
    fn descriptor(&self, section: SectionId) -> Option<&DungeonDescriptor> {
        self.dungeons.get(&section)
    }

    fn preview(&self, section: SectionId) -> Option<&PreviewAssets> {
        self.previews.get(&section)
    }
}

impl FlyOracle for StaticContent {
    fn destination(&self, section: SectionId) -> Option<FlyDestination> {
        self.fly.get(&section).copied()
    }
}

/// Preview assets keyed by `section` with a grey ramp palette warmed by the id.
pub fn preview_assets(section: SectionId) -> PreviewAssets {
    let warmth = u16::from(section.raw() % 4);
    let palette = (0..PREVIEW_PALETTE_LEN as u16)
        .map(|step| {
            let level = step * 2;
            Rgb555::new((level + warmth).min(31), level, level.saturating_sub(warmth))
        })
        .collect();
    PreviewAssets {
        tiles: AssetId::PreviewTiles(section),
        tilemap: AssetId::PreviewTilemap(section),
        palette,
    }
}
