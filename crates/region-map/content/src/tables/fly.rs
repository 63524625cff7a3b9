use region_map_core::{FlyDestination, SectionId};

const TOWN_GROUP: u8 = 3;

/// Flyable towns as `(section, map number, heal location)`; heal location 0 lands on the map itself.
const TOWNS: &[(SectionId, u8, u8)] = &[
    (SectionId(0x01), 0, 1),
    (SectionId(0x02), 1, 2),
    (SectionId(0x03), 2, 3),
    (SectionId(0x04), 3, 4),
    (SectionId(0x05), 4, 5),
    (SectionId(0x06), 5, 6),
    (SectionId(0x07), 6, 7),
    (SectionId(0x08), 7, 8),
    (SectionId(0x09), 8, 0),
    (SectionId(0x0A), 9, 9),
    (SectionId(0x36), 10, 10),
    (SectionId(0x37), 11, 11),
    (SectionId(0x41), 12, 12),
    (SectionId(0x42), 13, 13),
    (SectionId(0x43), 14, 14),
    (SectionId(0x44), 15, 0),
];

/// Built-in fly table.
pub fn fly_destinations() -> impl Iterator<Item = (SectionId, FlyDestination)> {
    TOWNS.iter().map(|&(section, map_num, heal_location)| {
        (
            section,
            FlyDestination {
                map_group: TOWN_GROUP,
                map_num,
                heal_location,
            },
        )
    })
}
