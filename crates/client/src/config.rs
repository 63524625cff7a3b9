//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use region_map_core::{MapKind, PresentationMode, SectionId};

/// Terminal viewer configuration.
///
/// This holds how the viewer hosts a session, separate from the
/// [`RegionMapConfig`](region_map_core::RegionMapConfig) the session itself reads.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub mode: PresentationMode,
    /// Directory holding `regions.ron` and friends; built-in content when unset.
    pub content_dir: Option<PathBuf>,
    /// TOML file overriding the session configuration.
    pub config_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub player: PlayerConfig,
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REGION_MAP_MODE` - `normal`, `wall` or `fly` (default: normal)
    /// - `REGION_MAP_CONTENT_DIR` - content directory (default: built-in tables)
    /// - `REGION_MAP_CONFIG` - session config TOML (default: content dir `config.toml` if present)
    /// - `REGION_MAP_PLAYER_SECTION` - section id the player stands in, decimal or `0x` hex
    /// - `REGION_MAP_PLAYER_X` / `REGION_MAP_PLAYER_Y` - position on that map in metatiles
    /// - `REGION_MAP_MAP_KIND` - overworld map kind, e.g. `town`, `indoor`
    /// - `REGION_MAP_LOG_DIR` - log directory (default: platform cache dir)
    /// - `REGION_MAP_SESSION_ID` - log subdirectory name (default: timestamp)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(mode) = read_env::<PresentationMode>("REGION_MAP_MODE") {
            config.mode = mode;
        }
        config.content_dir = read_env::<PathBuf>("REGION_MAP_CONTENT_DIR");
        config.config_path = read_env::<PathBuf>("REGION_MAP_CONFIG");
        config.log_dir = read_env::<PathBuf>("REGION_MAP_LOG_DIR");
        config.session_id = read_env::<String>("REGION_MAP_SESSION_ID");

        if let Some(section) = env::var("REGION_MAP_PLAYER_SECTION")
            .ok()
            .and_then(|raw| parse_section(&raw))
        {
            config.player.section = section;
        }
        if let Some(x) = read_env::<i16>("REGION_MAP_PLAYER_X") {
            config.player.x = x;
        }
        if let Some(y) = read_env::<i16>("REGION_MAP_PLAYER_Y") {
            config.player.y = y;
        }
        if let Some(kind) = read_env::<MapKind>("REGION_MAP_MAP_KIND") {
            config.player.map_kind = kind;
        }

        config
    }
}

/// Where the demo player stands when the map opens.
#[derive(Clone, Debug)]
pub struct PlayerConfig {
    pub section: SectionId,
    pub map_kind: MapKind,
    pub x: i16,
    pub y: i16,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            section: SectionId(0x01),
            map_kind: MapKind::Town,
            x: 10,
            y: 10,
        }
    }
}

/// Parses a section id written in decimal or `0x` hex.
pub fn parse_section(raw: &str) -> Option<SectionId> {
    let raw = raw.trim();
    let value = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok()?,
        None => raw.parse().ok()?,
    };
    Some(SectionId(value))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
