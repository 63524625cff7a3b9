//! Region map content: built-in tables and loaders for RON/TOML data files.
//!
//! This crate provides what the region map reads but never owns:
//! - Section names (static table)
//! - Region layouts (data-driven via RON, bundled default)
//! - Dungeon descriptors and preview assets (static table or RON)
//! - Fly destinations (static table or RON)
//! - Region map configuration (data-driven via TOML)
//!
//! All loaders use region-map-core types directly with serde for RON/TOML deserialization.

pub mod geometry;
mod oracle;
pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use geometry::derive_section_table;
pub use oracle::{StaticContent, preview_assets};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ContentLoader, LayoutLoader, builtin_lookup};
