//! Region map configuration loader.

use std::path::Path;

use region_map_core::RegionMapConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`RegionMapConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their `DEFAULT_*` values.
    pub fn load(path: &Path) -> LoadResult<RegionMapConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RegionMapConfig> {
        let config: RegionMapConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "heap_budget = 4096\nforce_switch_button = false").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.heap_budget, 4096);
        assert!(!config.force_switch_button);
        assert_eq!(
            config.select_closes_field_map,
            RegionMapConfig::DEFAULT_SELECT_CLOSES_FIELD_MAP
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        let error = ConfigLoader::parse("heap_budget = \"lots\"").unwrap_err();
        assert!(error.to_string().contains("Failed to parse config TOML"));
    }
}
