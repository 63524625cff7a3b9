use crate::config::RegionMapConfig;
use crate::error::TableError;
use crate::types::{Position, SectionId};

/// Grid footprint of a section in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub width: u8,
    pub height: u8,
}

impl Span {
    pub const UNIT: Self = Self { width: 1, height: 1 };

    pub const fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Everything the map knows about one section, kept together so a name can
/// never exist without its geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionMetadata {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub origin: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

impl SectionMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: Position::ORIGIN,
            span: Span::UNIT,
        }
    }

    pub fn with_geometry(mut self, origin: Position, span: Span) -> Self {
        self.origin = origin;
        self.span = span;
        self
    }
}

/// Dense table of section metadata indexed by [`SectionId`].
///
/// Construction validates the whole table so lookups never have to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionTable {
    entries: Vec<Option<SectionMetadata>>,
}

impl SectionTable {
    /// Builds the table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if an id is outside the named range, appears
    /// twice, or carries an empty name, zero span or off-grid origin.
    pub fn new<I>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (SectionId, SectionMetadata)>,
    {
        let mut table = vec![None; SectionId::COUNT];

        for (id, metadata) in entries {
            if !id.is_named() {
                return Err(TableError::SectionOutOfRange(id));
            }
            if metadata.name.trim().is_empty() {
                return Err(TableError::EmptyName(id));
            }
            if metadata.span.width == 0 || metadata.span.height == 0 {
                return Err(TableError::EmptySpan(id));
            }
            if !RegionMapConfig::contains(metadata.origin) {
                return Err(TableError::OriginOutOfBounds {
                    section: id,
                    origin: metadata.origin,
                });
            }

            let slot = &mut table[id.index()];
            if slot.is_some() {
                return Err(TableError::DuplicateSection(id));
            }
            *slot = Some(metadata);
        }

        Ok(Self { entries: table })
    }

    pub fn get(&self, id: SectionId) -> Option<&SectionMetadata> {
        self.entries.get(id.index()).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: SectionId) -> bool {
        self.get(id).is_some()
    }

    pub fn name(&self, id: SectionId) -> Option<&str> {
        self.get(id).map(|metadata| metadata.name.as_str())
    }

    /// Grid origin and span; sections without metadata sit at the origin with a unit span.
    pub fn origin_and_span(&self, id: SectionId) -> (Position, Span) {
        self.get(id)
            .map(|metadata| (metadata.origin, metadata.span))
            .unwrap_or((Position::ORIGIN, Span::UNIT))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionId, &SectionMetadata)> {
        self.entries.iter().enumerate().filter_map(|(index, entry)| {
            entry
                .as_ref()
                .map(|metadata| (SectionId::new(index as u8), metadata))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
