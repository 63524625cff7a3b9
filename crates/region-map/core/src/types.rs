//! Identifiers and small value types shared by every region map component.

/// Grid coordinates on the region map (cells, not pixels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Screen-space pixel coordinates handed to the display driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScreenPos {
    pub x: i16,
    pub y: i16,
}

impl ScreenPos {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// One of the switchable world maps.
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
pub enum Region {
    #[default]
    Rijon,
    Johto,
    SouthRijon,
}

impl Region {
    pub const COUNT: usize = 3;
    pub const ALL: [Region; Self::COUNT] = [Region::Rijon, Region::Johto, Region::SouthRijon];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Filter used when toggling icon visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionFilter {
    All,
    Only(Region),
}

impl RegionFilter {
    pub fn matches(self, region: Region) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(target) => target == region,
        }
    }
}

/// Key into the dense map-section namespace `[0, SectionId::COUNT)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SectionId(pub u8);

impl SectionId {
    /// Stand-in for sections that exist but have no data of their own.
    pub const PLACEHOLDER: Self = Self(0x4E);
    /// Empty grid cell.
    pub const NONE: Self = Self(0x4F);
    pub const COUNT: usize = 0x50;

    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// True for ids that carry a name (everything up to and including the placeholder).
    pub const fn is_named(self) -> bool {
        self.0 <= Self::PLACEHOLDER.0
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::NONE
    }
}

impl core::fmt::Display for SectionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "mapsec#{:#04x}", self.0)
    }
}

/// The two parallel grids of a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Layer {
    Surface,
    Dungeon,
}

impl Layer {
    pub const COUNT: usize = 2;
    pub const ALL: [Layer; Self::COUNT] = [Layer::Surface, Layer::Dungeon];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Visitation status of a section, derived from save data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SectionType {
    #[default]
    None,
    Route,
    Visited,
    NotVisited,
    Unknown,
}

impl SectionType {
    /// Sections worth a scroll cue when the cursor lands on them.
    pub const fn is_notable(self) -> bool {
        !matches!(self, SectionType::None | SectionType::Route)
    }

    pub const fn is_town(self) -> bool {
        matches!(self, SectionType::Visited | SectionType::NotVisited)
    }
}

/// Four-way direction for cursor movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}
