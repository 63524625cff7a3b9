use crate::types::SectionId;

/// Kind of overworld map the player is standing on.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MapKind {
    #[default]
    Town,
    City,
    Route,
    Underwater,
    OceanRoute,
    Underground,
    Unknown,
    SecretBase,
    Indoor,
}

impl MapKind {
    /// Fly cannot take off from these map kinds.
    pub const fn blocks_fly(self) -> bool {
        matches!(self, MapKind::Underground | MapKind::Indoor)
    }
}

/// A saved overworld position together with the map it refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLocation {
    pub map_group: u8,
    pub map_num: u8,
    pub section: SectionId,
    /// Map extent in metatiles.
    pub width: u16,
    pub height: u16,
    /// Position on the map in metatiles.
    pub x: i16,
    pub y: i16,
}

/// Sprite set used for the player's marker.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PlayerAvatar {
    #[default]
    Red,
    Leaf,
}

/// Save-data view of where the player currently is.
pub trait OverworldOracle: Send + Sync {
    fn current_map_kind(&self) -> MapKind;

    fn current_location(&self) -> MapLocation;

    /// Last outdoor position the player entered a cave or building from.
    fn escape_warp_location(&self) -> MapLocation;

    /// Position recorded by the last dynamic warp.
    fn dynamic_warp_location(&self) -> MapLocation;

    fn player_avatar(&self) -> PlayerAvatar {
        PlayerAvatar::Red
    }
}
