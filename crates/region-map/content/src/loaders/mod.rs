//! Content loaders for reading region map data from files.
//!
//! Layouts and the content tables are RON, configuration is TOML. Every
//! loader converts its file format into region-map-core types.

pub mod builtin;
pub mod config;
pub mod content;
pub mod factory;
pub mod layout;

pub use builtin::builtin_lookup;
pub use config::ConfigLoader;
pub use content::ContentLoader;
pub use factory::ContentFactory;
pub use layout::LayoutLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
