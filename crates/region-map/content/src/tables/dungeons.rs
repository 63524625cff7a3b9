use region_map_core::{DungeonDescriptor, SectionId};

/// Built-in dungeon descriptions as `(section, description)`; names come from the section table.
pub const DUNGEON_DESCRIPTIONS: &[(SectionId, &str)] = &[
    (
        SectionId::PLACEHOLDER,
        "Little is known about this place. Explore it to fill in the details.",
    ),
    (
        SectionId(0x1F),
        "A damp cave under Merson City. Its tunnels wind between the city's wells.",
    ),
    (
        SectionId(0x20),
        "Layered caverns inside Mt. Boulder. Strong trainers train in the depths.",
    ),
    (
        SectionId(0x30),
        "An abandoned power plant. Electric Pokemon gather around the old generators.",
    ),
    (
        SectionId(0x3E),
        "A long cave linking the routes south of Goldenrod City.",
    ),
    (
        SectionId(0x46),
        "Crumbling ruins said to hold the memory of a lost age.",
    ),
];

/// Builds a descriptor for every built-in description, naming it through `name`.
pub fn dungeon_descriptors(name: impl Fn(SectionId) -> Option<&'static str>) -> Vec<DungeonDescriptor> {
    DUNGEON_DESCRIPTIONS
        .iter()
        .map(|(section, description)| DungeonDescriptor {
            section: *section,
            name: name(*section).unwrap_or(DungeonDescriptor::NO_DATA).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}
