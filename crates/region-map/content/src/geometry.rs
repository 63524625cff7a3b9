//! Section geometry derived from where a section's cells sit on the grid.

use std::collections::BTreeMap;

use region_map_core::{
    Layer, Position, Region, RegionLayout, SectionId, SectionMetadata, SectionTable, Span,
    TableError,
};

/// Builds a section table whose origins and spans are the bounding boxes of
/// each section's surface cells in the first region that contains it.
///
/// Sections that never appear on a surface layer keep the unit geometry at the
/// grid origin.
///
/// # Errors
///
/// Returns [`TableError`] when the names fail the table's validation.
pub fn derive_section_table<N>(
    names: impl IntoIterator<Item = (SectionId, N)>,
    layouts: &[(Region, RegionLayout)],
) -> Result<SectionTable, TableError>
where
    N: Into<String>,
{
    let bounds = surface_bounds(layouts);
    SectionTable::new(names.into_iter().map(|(section, name)| {
        let metadata = SectionMetadata::new(name);
        let metadata = match bounds.get(&section) {
            Some(&(min, max)) => metadata.with_geometry(
                min,
                Span::new((max.x - min.x + 1) as u8, (max.y - min.y + 1) as u8),
            ),
            None => metadata,
        };
        (section, metadata)
    }))
}

fn surface_bounds(layouts: &[(Region, RegionLayout)]) -> BTreeMap<SectionId, (Position, Position)> {
    let mut ordered: Vec<_> = layouts.iter().collect();
    ordered.sort_by_key(|(region, _)| region.index());

    let mut bounds = BTreeMap::new();
    for (region, layout) in ordered {
        let mut seen: BTreeMap<SectionId, (Position, Position)> = BTreeMap::new();
        for (position, section) in layout.occupied(Layer::Surface) {
            seen.entry(section)
                .and_modify(|(min, max)| {
                    min.x = min.x.min(position.x);
                    min.y = min.y.min(position.y);
                    max.x = max.x.max(position.x);
                    max.y = max.y.max(position.y);
                })
                .or_insert((position, position));
        }
        for (section, extent) in seen {
            if bounds.contains_key(&section) {
                tracing::debug!(%section, %region, "section already placed in an earlier region");
                continue;
            }
            bounds.insert(section, extent);
        }
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_spans_every_surface_cell() {
        let town = SectionId(0x01);
        let route = SectionId(0x0B);
        let mut rijon = RegionLayout::empty();
        rijon.set(Layer::Surface, Position::new(3, 9), town).unwrap();
        for x in 4..7 {
            rijon.set(Layer::Surface, Position::new(x, 9), route).unwrap();
            rijon.set(Layer::Surface, Position::new(x, 10), route).unwrap();
        }

        let table = derive_section_table(
            [(town, "Seashore City"), (route, "Route 48")],
            &[(Region::Rijon, rijon)],
        )
        .unwrap();

        assert_eq!(table.origin_and_span(town), (Position::new(3, 9), Span::UNIT));
        assert_eq!(table.origin_and_span(route), (Position::new(4, 9), Span::new(3, 2)));
    }

    #[test]
    fn first_region_wins() {
        let gate = SectionId(0x35);
        let mut rijon = RegionLayout::empty();
        rijon.set(Layer::Surface, Position::new(10, 14), gate).unwrap();
        let mut south = RegionLayout::empty();
        south.set(Layer::Surface, Position::new(2, 0), gate).unwrap();

        let table = derive_section_table(
            [(gate, "South Rijon Gate")],
            &[(Region::SouthRijon, south), (Region::Rijon, rijon)],
        )
        .unwrap();
        assert_eq!(table.origin_and_span(gate).0, Position::new(10, 14));
    }
}
