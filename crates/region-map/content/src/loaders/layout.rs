//! Region layout loader.
//!
//! A layout file lists, per region, rectangles of cells filled with one
//! section on the surface or dungeon layer. Later placements overwrite
//! earlier ones.

use std::path::Path;

use region_map_core::{Layer, Position, Region, RegionLayout, SectionId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Layout file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayoutFileRon {
    regions: Vec<RegionRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegionRon {
    region: Region,
    #[serde(default)]
    surface: Vec<PlacementRon>,
    #[serde(default)]
    dungeon: Vec<PlacementRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlacementRon {
    section: u8,
    at: (i32, i32),
    #[serde(default = "unit_size")]
    size: (i32, i32),
}

fn unit_size() -> (i32, i32) {
    (1, 1)
}

/// Loader for region layouts from RON files.
pub struct LayoutLoader;

impl LayoutLoader {
    /// Load every region layout from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<(Region, RegionLayout)>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse layouts from RON text.
    ///
    /// Fails on a placement that leaves the grid, names an id outside the
    /// section namespace, or a region listed twice.
    pub fn parse(content: &str) -> LoadResult<Vec<(Region, RegionLayout)>> {
        let data: LayoutFileRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse layout RON: {}", e))?;

        let mut layouts: Vec<(Region, RegionLayout)> = Vec::with_capacity(data.regions.len());
        for entry in data.regions {
            if layouts.iter().any(|(region, _)| *region == entry.region) {
                anyhow::bail!("Region {} is defined more than once", entry.region);
            }

            let mut layout = RegionLayout::empty();
            for (layer, placements) in [(Layer::Surface, &entry.surface), (Layer::Dungeon, &entry.dungeon)] {
                for placement in placements {
                    place(&mut layout, layer, placement)
                        .map_err(|e| anyhow::anyhow!("Region {}: {}", entry.region, e))?;
                }
            }
            layouts.push((entry.region, layout));
        }

        Ok(layouts)
    }
}

fn place(layout: &mut RegionLayout, layer: Layer, placement: &PlacementRon) -> LoadResult<()> {
    let section = SectionId(placement.section);
    if !section.is_named() {
        anyhow::bail!("{} layer placement uses {} which has no name", layer, section);
    }
    let (width, height) = placement.size;
    if width <= 0 || height <= 0 {
        anyhow::bail!("{} has an empty placement on the {} layer", section, layer);
    }

    let (x, y) = placement.at;
    for row in y..y + height {
        for col in x..x + width {
            layout.set(layer, Position::new(col, row), section)?;
        }
    }
    Ok(())
}
