//! Content factory for building the region map environment from data files.

use std::path::{Path, PathBuf};

use region_map_core::{MapSectionLookup, RegionMapConfig};

use crate::StaticContent;
use crate::loaders::{ConfigLoader, ContentLoader, LayoutLoader, LoadResult, builtin};
use crate::tables::SECTION_NAMES;

/// Content factory that loads region map content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── regions.ron
/// ├── dungeons.ron   (optional)
/// └── fly.ron        (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<RegionMapConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the section lookup from `regions.ron`, named by the built-in table.
    pub fn load_lookup(&self) -> LoadResult<MapSectionLookup> {
        let layouts = LayoutLoader::load(&self.data_dir.join("regions.ron"))?;
        builtin::build_lookup(SECTION_NAMES.iter().copied(), layouts)
    }

    /// Load dungeon descriptors and the fly table.
    ///
    /// Falls back to the built-in tables when either file is absent.
    pub fn load_content(&self) -> LoadResult<StaticContent> {
        let dungeons = self.data_dir.join("dungeons.ron");
        let fly = self.data_dir.join("fly.ron");
        if dungeons.exists() && fly.exists() {
            return ContentLoader::load(&dungeons, &fly);
        }

        tracing::debug!(dir = %self.data_dir.display(), "using built-in dungeon and fly tables");
        Ok(StaticContent::builtin())
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use region_map_core::{DungeonOracle, Region, SectionId};

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_a_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "heap_budget = 1024\n").unwrap();
        std::fs::write(
            dir.path().join("regions.ron"),
            "(regions: [(region: Johto, surface: [(section: 0x36, at: (4, 4))])])",
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().heap_budget, 1024);

        let lookup = factory.load_lookup().unwrap();
        assert_eq!(lookup.home_region(SectionId(0x36)), Some(Region::Johto));
        assert!(lookup.layout(Region::Rijon).is_none());

        let content = factory.load_content().unwrap();
        assert!(content.descriptor(SectionId(0x1F)).is_some());
    }

    #[test]
    fn missing_layouts_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ContentFactory::new(dir.path()).load_lookup().is_err());
    }
}
