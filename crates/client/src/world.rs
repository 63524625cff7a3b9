//! Demo world the viewer hosts the region map in.
//!
//! The overworld and save data are stand-ins: the player stands where the
//! environment says, and every section on the player's home region plus every
//! described dungeon counts as visited.

use anyhow::Result;
use region_map_content::{ContentFactory, StaticContent, builtin_lookup};
use region_map_core::{
    DungeonOracle, Layer, MapKind, MapLocation, MapSectionLookup, OverworldOracle, Region,
    RegionMapConfig, RegionMapEnv, SectionId, VisitLog,
};

use crate::config::{CliConfig, PlayerConfig};

/// Map extent reported for every demo location, in metatiles.
const DEMO_MAP_EXTENT: u16 = 20;

/// Overworld view fixed at one location.
#[derive(Clone, Debug)]
pub struct DemoOverworld {
    kind: MapKind,
    location: MapLocation,
}

impl DemoOverworld {
    pub fn new(player: &PlayerConfig) -> Self {
        Self {
            kind: player.map_kind,
            location: MapLocation {
                map_group: 0,
                map_num: 0,
                section: player.section,
                width: DEMO_MAP_EXTENT,
                height: DEMO_MAP_EXTENT,
                x: player.x,
                y: player.y,
            },
        }
    }
}

impl OverworldOracle for DemoOverworld {
    fn current_map_kind(&self) -> MapKind {
        self.kind
    }

    fn current_location(&self) -> MapLocation {
        self.location
    }

    fn escape_warp_location(&self) -> MapLocation {
        self.location
    }

    fn dynamic_warp_location(&self) -> MapLocation {
        self.location
    }
}

/// Everything a session borrows, owned in one place.
pub struct World {
    pub lookup: MapSectionLookup,
    pub content: StaticContent,
    pub overworld: DemoOverworld,
    pub progress: VisitLog,
    pub config: RegionMapConfig,
}

impl World {
    /// Loads content from `REGION_MAP_CONTENT_DIR` or the built-in tables.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let (lookup, content, mut config) = match &cli.content_dir {
            Some(dir) => {
                tracing::info!("Loading content from {}", dir.display());
                let factory = ContentFactory::new(dir);
                let config = if factory.data_dir().join("config.toml").exists() {
                    factory.load_config()?
                } else {
                    RegionMapConfig::default()
                };
                (factory.load_lookup()?, factory.load_content()?, config)
            }
            None => {
                tracing::info!("Using built-in content");
                (builtin_lookup()?, StaticContent::builtin(), RegionMapConfig::default())
            }
        };

        if let Some(path) = &cli.config_path {
            config = region_map_content::ConfigLoader::load(path)?;
        }

        let progress = demo_progress(&lookup, &content, cli.player.section);
        Ok(Self {
            lookup,
            content,
            overworld: DemoOverworld::new(&cli.player),
            progress,
            config,
        })
    }

    pub fn env(&self) -> RegionMapEnv<'_> {
        RegionMapEnv::new(
            &self.lookup,
            &self.content,
            &self.content,
            &self.overworld,
            &self.progress,
        )
    }
}

/// Visits every surface section of the player's home region and every
/// described dungeon; other regions' towns stay unvisited.
pub fn demo_progress(
    lookup: &MapSectionLookup,
    dungeons: &dyn DungeonOracle,
    player_section: SectionId,
) -> VisitLog {
    let home = lookup.home_region(player_section).unwrap_or_default();
    let mut progress = VisitLog::new();

    for region in Region::ALL {
        let Some(layout) = lookup.layout(region) else {
            continue;
        };
        for (_, section) in layout.occupied(Layer::Surface) {
            if region == home {
                progress.visit(Layer::Surface, section);
            } else {
                progress.mark_route(section);
            }
        }
        for (_, section) in layout.occupied(Layer::Dungeon) {
            if dungeons.descriptor(section).is_some() {
                progress.visit(Layer::Dungeon, section);
            }
        }
    }

    progress
}
