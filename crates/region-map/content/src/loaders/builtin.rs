//! Section lookup compiled from the bundled layout file.

use region_map_core::{MapSectionLookup, Region, RegionLayout, SectionId};

use crate::geometry::derive_section_table;
use crate::loaders::{LayoutLoader, LoadResult};
use crate::tables::SECTION_NAMES;

const BUILTIN_LAYOUTS: &str = include_str!("../../data/regions.ron");

/// Lookup over the bundled layouts and built-in section names.
pub fn builtin_lookup() -> LoadResult<MapSectionLookup> {
    let layouts = LayoutLoader::parse(BUILTIN_LAYOUTS)?;
    build_lookup(SECTION_NAMES.iter().copied(), layouts)
}

/// Lookup over `layouts` with geometry derived from their surface cells.
pub fn build_lookup<N>(
    names: impl IntoIterator<Item = (SectionId, N)>,
    layouts: Vec<(Region, RegionLayout)>,
) -> LoadResult<MapSectionLookup>
where
    N: Into<String>,
{
    let sections = derive_section_table(names, &layouts)?;
    let lookup = MapSectionLookup::new(sections, layouts)?;
    tracing::debug!(sections = lookup.sections().len(), "section lookup built");
    Ok(lookup)
}
