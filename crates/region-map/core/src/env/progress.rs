use std::collections::BTreeSet;

use crate::types::{Layer, SectionId, SectionType};

/// Save-data view of which sections the player has seen.
pub trait ProgressOracle: Send + Sync {
    fn section_type(&self, layer: Layer, section: SectionId) -> SectionType;
}

/// In-memory visitation record.
///
/// Sections default to [`SectionType::NotVisited`] until marked otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisitLog {
    visited: [BTreeSet<SectionId>; Layer::COUNT],
    routes: BTreeSet<SectionId>,
    unknown: BTreeSet<SectionId>,
}

impl VisitLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&mut self, layer: Layer, section: SectionId) -> &mut Self {
        self.visited[layer.index()].insert(section);
        self
    }

    pub fn mark_route(&mut self, section: SectionId) -> &mut Self {
        self.routes.insert(section);
        self
    }

    pub fn mark_unknown(&mut self, section: SectionId) -> &mut Self {
        self.unknown.insert(section);
        self
    }
}

impl ProgressOracle for VisitLog {
    fn section_type(&self, layer: Layer, section: SectionId) -> SectionType {
        if section.is_none() {
            SectionType::None
        } else if self.visited[layer.index()].contains(&section) {
            SectionType::Visited
        } else if layer == Layer::Surface && self.routes.contains(&section) {
            SectionType::Route
        } else if self.unknown.contains(&section) {
            SectionType::Unknown
        } else {
            SectionType::NotVisited
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_sections_per_layer() {
        let mut log = VisitLog::new();
        log.visit(Layer::Surface, SectionId(1))
            .mark_route(SectionId(0x0C))
            .mark_unknown(SectionId(0x2E));

        assert_eq!(log.section_type(Layer::Surface, SectionId(1)), SectionType::Visited);
        assert_eq!(log.section_type(Layer::Dungeon, SectionId(1)), SectionType::NotVisited);
        assert_eq!(log.section_type(Layer::Surface, SectionId(0x0C)), SectionType::Route);
        assert_eq!(log.section_type(Layer::Dungeon, SectionId(0x2E)), SectionType::Unknown);
        assert_eq!(log.section_type(Layer::Surface, SectionId::NONE), SectionType::None);
    }
}
