//! Fixed-width section names for the name windows.

use crate::config::RegionMapConfig;
use crate::env::MapSectionLookup;
use crate::types::SectionId;

/// Name of `section` padded with spaces to `fill` characters.
///
/// A `fill` of zero means [`RegionMapConfig::DEFAULT_NAME_FILL`]. Names longer
/// than `fill` are kept whole. Unknown sections yield `fill` spaces.
pub fn map_name(lookup: &MapSectionLookup, section: SectionId, fill: usize) -> String {
    let fill = if fill == 0 { RegionMapConfig::DEFAULT_NAME_FILL } else { fill };
    let name = lookup.name(section).unwrap_or_default();
    format!("{name:<fill$}")
}
