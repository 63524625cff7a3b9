//! Dungeon descriptor and fly table loader.

use std::path::Path;

use region_map_core::{DungeonDescriptor, FlyDestination, SectionId};
use serde::{Deserialize, Serialize};

use crate::StaticContent;
use crate::loaders::{LoadResult, read_file};

/// Fly table entry as written in `fly.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FlyEntryRon {
    section: SectionId,
    map_group: u8,
    map_num: u8,
    #[serde(default)]
    heal_location: u8,
}

/// Loader for [`StaticContent`] from RON files.
pub struct ContentLoader;

impl ContentLoader {
    /// Load dungeon descriptors from `dungeons` and the fly table from `fly`.
    pub fn load(dungeons: &Path, fly: &Path) -> LoadResult<StaticContent> {
        let dungeons = Self::parse_dungeons(&read_file(dungeons)?)?;
        let fly = Self::parse_fly(&read_file(fly)?)?;
        Ok(StaticContent::new(dungeons, fly))
    }

    /// Parse a list of dungeon descriptors.
    pub fn parse_dungeons(content: &str) -> LoadResult<Vec<DungeonDescriptor>> {
        let descriptors: Vec<DungeonDescriptor> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dungeons RON: {}", e))?;

        for (index, descriptor) in descriptors.iter().enumerate() {
            if !descriptor.section.is_named() {
                anyhow::bail!("Dungeon {} uses {} which has no name", index, descriptor.section);
            }
            if descriptors[..index].iter().any(|d| d.section == descriptor.section) {
                anyhow::bail!("Dungeon {} is described more than once", descriptor.section);
            }
        }

        Ok(descriptors)
    }

    /// Parse the fly table.
    pub fn parse_fly(content: &str) -> LoadResult<Vec<(SectionId, FlyDestination)>> {
        let entries: Vec<FlyEntryRon> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse fly RON: {}", e))?;

        Ok(entries
            .into_iter()
            .map(|entry| {
                (
                    entry.section,
                    FlyDestination {
                        map_group: entry.map_group,
                        map_num: entry.map_num,
                        heal_location: entry.heal_location,
                    },
                )
            })
            .collect())
    }
}
