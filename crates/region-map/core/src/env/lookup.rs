use crate::config::RegionMapConfig;
use crate::env::section::{SectionTable, Span};
use crate::error::TableError;
use crate::types::{Layer, Position, Region, SectionId};

const CELLS: usize = (RegionMapConfig::MAP_WIDTH * RegionMapConfig::MAP_HEIGHT) as usize;

/// Both layer grids of one region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionLayout {
    layers: [Vec<SectionId>; Layer::COUNT],
}

impl RegionLayout {
    pub fn empty() -> Self {
        Self {
            layers: [vec![SectionId::NONE; CELLS], vec![SectionId::NONE; CELLS]],
        }
    }

    /// Places `section` in one cell.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CellOutOfBounds`] when the cell is off the grid.
    pub fn set(
        &mut self,
        layer: Layer,
        position: Position,
        section: SectionId,
    ) -> Result<(), TableError> {
        let index = cell_index(position).ok_or(TableError::CellOutOfBounds(position))?;
        self.layers[layer.index()][index] = section;
        Ok(())
    }

    pub fn get(&self, layer: Layer, position: Position) -> SectionId {
        cell_index(position)
            .map(|index| self.layers[layer.index()][index])
            .unwrap_or(SectionId::NONE)
    }

    /// Occupied cells of one layer in row-major order.
    pub fn occupied(&self, layer: Layer) -> impl Iterator<Item = (Position, SectionId)> + '_ {
        self.layers[layer.index()]
            .iter()
            .enumerate()
            .filter(|(_, section)| !section.is_none())
            .map(|(index, section)| {
                let width = RegionMapConfig::MAP_WIDTH as usize;
                (
                    Position::new((index % width) as i32, (index / width) as i32),
                    *section,
                )
            })
    }
}

impl Default for RegionLayout {
    fn default() -> Self {
        Self::empty()
    }
}

fn cell_index(position: Position) -> Option<usize> {
    RegionMapConfig::contains(position)
        .then(|| (position.y * RegionMapConfig::MAP_WIDTH + position.x) as usize)
}

/// Section lookup over every region's grids plus the section table.
///
/// Lookups are constant time and never fail: unknown regions and off-grid
/// cells read as [`SectionId::NONE`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapSectionLookup {
    sections: SectionTable,
    layouts: [Option<RegionLayout>; Region::COUNT],
}

impl MapSectionLookup {
    /// Builds the lookup, checking that every occupied cell names a known section.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownSection`] for a cell whose section has no
    /// metadata in `sections`.
    pub fn new<I>(sections: SectionTable, layouts: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (Region, RegionLayout)>,
    {
        let mut slots: [Option<RegionLayout>; Region::COUNT] = Default::default();

        for (region, layout) in layouts {
            for layer in Layer::ALL {
                if let Some((position, section)) = layout
                    .occupied(layer)
                    .find(|(_, section)| !sections.contains(*section))
                {
                    return Err(TableError::UnknownSection { section, position });
                }
            }
            slots[region.index()] = Some(layout);
        }

        Ok(Self {
            sections,
            layouts: slots,
        })
    }

    /// Section occupying `(row, col)` of `layer` in `region`.
    pub fn section_at(&self, region: Region, layer: Layer, row: i32, col: i32) -> SectionId {
        self.layouts[region.index()]
            .as_ref()
            .map(|layout| layout.get(layer, Position::new(col, row)))
            .unwrap_or(SectionId::NONE)
    }

    pub fn origin_and_span(&self, section: SectionId) -> (Position, Span) {
        self.sections.origin_and_span(section)
    }

    pub fn name(&self, section: SectionId) -> Option<&str> {
        self.sections.name(section)
    }

    pub fn sections(&self) -> &SectionTable {
        &self.sections
    }

    pub fn layout(&self, region: Region) -> Option<&RegionLayout> {
        self.layouts[region.index()].as_ref()
    }

    /// First region whose surface grid contains `section`.
    pub fn home_region(&self, section: SectionId) -> Option<Region> {
        Region::ALL.into_iter().find(|region| {
            self.layout(*region).is_some_and(|layout| {
                layout
                    .occupied(Layer::Surface)
                    .any(|(_, occupant)| occupant == section)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::section::SectionMetadata;

    fn lookup() -> MapSectionLookup {
        let sections = SectionTable::new([
            (SectionId(0x01), SectionMetadata::new("Seashore City")),
            (SectionId(0x1F), SectionMetadata::new("Merson Cave")),
            (SectionId(0x36), SectionMetadata::new("Goldenrod City")),
        ])
        .unwrap();

        let mut rijon = RegionLayout::empty();
        rijon.set(Layer::Surface, Position::new(3, 4), SectionId(0x01)).unwrap();
        rijon.set(Layer::Dungeon, Position::new(3, 4), SectionId(0x1F)).unwrap();
        let mut johto = RegionLayout::empty();
        johto.set(Layer::Surface, Position::new(10, 2), SectionId(0x36)).unwrap();

        MapSectionLookup::new(sections, [(Region::Rijon, rijon), (Region::Johto, johto)]).unwrap()
    }

    #[test]
    fn section_at_reads_both_layers() {
        let lookup = lookup();
        assert_eq!(lookup.section_at(Region::Rijon, Layer::Surface, 4, 3), SectionId(0x01));
        assert_eq!(lookup.section_at(Region::Rijon, Layer::Dungeon, 4, 3), SectionId(0x1F));
        assert_eq!(lookup.section_at(Region::Rijon, Layer::Surface, 3, 4), SectionId::NONE);
    }

    #[test]
    fn missing_region_and_off_grid_cells_read_as_none() {
        let lookup = lookup();
        assert_eq!(lookup.section_at(Region::SouthRijon, Layer::Surface, 4, 3), SectionId::NONE);
        assert_eq!(lookup.section_at(Region::Rijon, Layer::Surface, -1, 0), SectionId::NONE);
        assert_eq!(lookup.section_at(Region::Rijon, Layer::Surface, 0, 22), SectionId::NONE);
    }

    #[test]
    fn home_region_scans_surface_layers() {
        let lookup = lookup();
        assert_eq!(lookup.home_region(SectionId(0x36)), Some(Region::Johto));
        assert_eq!(lookup.home_region(SectionId(0x1F)), None);
    }

    #[test]
    fn layout_cells_must_reference_known_sections() {
        let mut layout = RegionLayout::empty();
        layout.set(Layer::Surface, Position::new(0, 0), SectionId(0x02)).unwrap();
        let err = MapSectionLookup::new(SectionTable::default(), [(Region::Rijon, layout)]).unwrap_err();
        assert_eq!(
            err,
            TableError::UnknownSection {
                section: SectionId(0x02),
                position: Position::ORIGIN
            }
        );
    }

    #[test]
    fn set_rejects_off_grid_cells() {
        let mut layout = RegionLayout::empty();
        assert_eq!(
            layout.set(Layer::Dungeon, Position::new(5, 15), SectionId(0x01)),
            Err(TableError::CellOutOfBounds(Position::new(5, 15)))
        );
    }
}
