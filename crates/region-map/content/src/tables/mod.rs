//! Built-in static tables.
mod dungeons;
mod fly;
mod names;

pub use dungeons::{DUNGEON_DESCRIPTIONS, dungeon_descriptors};
pub use fly::fly_destinations;
pub use names::{SECTION_NAMES, section_name};
