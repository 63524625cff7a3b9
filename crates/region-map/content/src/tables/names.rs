use region_map_core::SectionId;

/// Display names of every named section, in id order.
pub const SECTION_NAMES: &[(SectionId, &str)] = &[
    // Rijon
    (SectionId(0x01), "Seashore City"),
    (SectionId(0x02), "Gravel Town"),
    (SectionId(0x03), "Merson City"),
    (SectionId(0x04), "Hayward City"),
    (SectionId(0x05), "Owsauri City"),
    (SectionId(0x06), "Moraga Town"),
    (SectionId(0x07), "Jaeru City"),
    (SectionId(0x08), "Botan City"),
    (SectionId(0x09), "Castro Valley"),
    (SectionId(0x0A), "Eagulou City"),
    (SectionId(0x0B), "Route 48"),
    (SectionId(0x0C), "Route 49"),
    (SectionId(0x0D), "Route 50"),
    (SectionId(0x0E), "Route 51"),
    (SectionId(0x0F), "Route 52"),
    (SectionId(0x10), "Route 53"),
    (SectionId(0x11), "Route 54"),
    (SectionId(0x12), "Route 55"),
    (SectionId(0x13), "Route 56"),
    (SectionId(0x14), "Route 57"),
    (SectionId(0x15), "Route 58"),
    (SectionId(0x16), "Route 59"),
    (SectionId(0x17), "Route 60"),
    (SectionId(0x18), "Route 61"),
    (SectionId(0x19), "Route 62"),
    (SectionId(0x1A), "Route 63"),
    (SectionId(0x1B), "Route 64"),
    (SectionId(0x1C), "Route 65"),
    (SectionId(0x1D), "Route 66"),
    (SectionId(0x1E), "Route 67"),
    (SectionId(0x1F), "Merson Cave"),
    (SectionId(0x20), "Mt. Boulder Caves"),
    (SectionId(0x21), "Trainer Hill"),
    (SectionId(0x22), "Dock Underpass"),
    (SectionId(0x23), "Rijon Tunnel"),
    (SectionId(0x24), "Silk Tunnel"),
    (SectionId(0x25), "Botan Outskirts"),
    (SectionId(0x26), "Silph Warehouse"),
    (SectionId(0x27), "Haunted Forest"),
    (SectionId(0x28), "Forest Gate"),
    (SectionId(0x29), "International Tunnel"),
    (SectionId(0x2A), "Koolboy Mansion"),
    (SectionId(0x2B), "Castro Forest"),
    (SectionId(0x2C), "City Underpass"),
    (SectionId(0x2D), "Eagulou Park"),
    (SectionId(0x2E), "Secret Cave"),
    (SectionId(0x2F), "Victory Cave"),
    (SectionId(0x30), "Power Plant"),
    (SectionId(0x31), "Hardnook Cave"),
    (SectionId(0x32), "Seneca Caverns"),
    (SectionId(0x33), "30 Years Cave"),
    (SectionId(0x34), "Final Dungeon"),
    (SectionId(0x35), "South Rijon Gate"),
    // Johto
    (SectionId(0x36), "Goldenrod City"),
    (SectionId(0x37), "Azalea Town"),
    (SectionId(0x38), "Route 32"),
    (SectionId(0x39), "Route 33"),
    (SectionId(0x3A), "Route 34"),
    (SectionId(0x3B), "Route 47"),
    (SectionId(0x3C), "Ilex Forest"),
    (SectionId(0x3D), "Slowpoke Well"),
    (SectionId(0x3E), "Union Cave"),
    (SectionId(0x3F), "Ruins of Alph"),
    // South Rijon
    (SectionId(0x40), "South Rijon Gate"),
    (SectionId(0x41), "Wyler Town"),
    (SectionId(0x42), "Quena Civic"),
    (SectionId(0x43), "Crosse Civic"),
    (SectionId(0x44), "Maroon Cliff Town"),
    (SectionId(0x45), "Wyvern Road"),
    (SectionId(0x46), "Time Relic Ruins"),
    (SectionId(0x47), "Streamwind Coast"),
    (SectionId(0x48), "Quena Edge Isle"),
    (SectionId(0x49), "Bond Rock Meadow"),
    (SectionId(0x4A), "Mourning Paddock"),
    (SectionId(0x4B), "Fountain Rock"),
    (SectionId(0x4C), "Crossing Spire"),
    (SectionId(0x4D), "Rockmoss Altars"),
    (SectionId::PLACEHOLDER, "???"),
];

/// Built-in name of `section`, if it has one.
pub fn section_name(section: SectionId) -> Option<&'static str> {
    SECTION_NAMES
        .iter()
        .find(|(id, _)| *id == section)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_sorted_and_unique() {
        assert!(SECTION_NAMES.windows(2).all(|pair| pair[0].0 < pair[1].0));
        assert!(SECTION_NAMES.iter().all(|(id, name)| id.is_named() && !name.is_empty()));
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(section_name(SectionId(0x36)), Some("Goldenrod City"));
        assert_eq!(section_name(SectionId::NONE), None);
    }
}
