use crate::display::AssetId;
use crate::palette::Rgb555;
use crate::types::SectionId;

/// Name and flavor text shown by the dungeon preview.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonDescriptor {
    pub section: SectionId,
    pub name: String,
    pub description: String,
}

impl DungeonDescriptor {
    pub const NO_DATA: &'static str = "No data";

    /// Descriptor used when neither the section nor the placeholder has one.
    pub fn no_data(section: SectionId) -> Self {
        Self {
            section,
            name: Self::NO_DATA.to_string(),
            description: Self::NO_DATA.to_string(),
        }
    }
}

/// Graphics for one dungeon preview image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewAssets {
    pub tiles: AssetId,
    pub tilemap: AssetId,
    pub palette: Vec<Rgb555>,
}

impl PreviewAssets {
    /// Asset set registered under [`SectionId::PLACEHOLDER`] by convention.
    pub fn placeholder() -> Self {
        Self {
            tiles: AssetId::PreviewTiles(SectionId::PLACEHOLDER),
            tilemap: AssetId::PreviewTilemap(SectionId::PLACEHOLDER),
            palette: vec![Rgb555::WHITE; 16],
        }
    }
}

/// Static dungeon descriptor and preview tables.
pub trait DungeonOracle: Send + Sync {
    fn descriptor(&self, section: SectionId) -> Option<&DungeonDescriptor>;

    fn preview(&self, section: SectionId) -> Option<&PreviewAssets>;

    /// Descriptor for `section`, falling back to the placeholder entry and then
    /// to a "no data" descriptor.
    fn descriptor_or_placeholder(&self, section: SectionId) -> DungeonDescriptor {
        match self
            .descriptor(section)
            .or_else(|| self.descriptor(SectionId::PLACEHOLDER))
        {
            Some(descriptor) => descriptor.clone(),
            None => {
                tracing::warn!("no dungeon descriptor for {}", section);
                DungeonDescriptor::no_data(section)
            }
        }
    }

    /// Preview assets for `section`, falling back to the placeholder set.
    fn preview_or_placeholder(&self, section: SectionId) -> PreviewAssets {
        self.preview(section)
            .or_else(|| self.preview(SectionId::PLACEHOLDER))
            .cloned()
            .unwrap_or_else(PreviewAssets::placeholder)
    }
}
