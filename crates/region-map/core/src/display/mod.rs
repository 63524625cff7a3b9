//! Display, sound and text services the state machines drive.
//!
//! [`DisplayDriver`] abstracts the console's background, window, blend,
//! sprite, palette-fade, sound and text primitives. Calls are synchronous and
//! infallible; a driver that hits an irrecoverable condition reports it
//! through [`DisplayDriver::take_fault`] and the session turns it into a fatal
//! error. [`VirtualDisplay`] is a complete software implementation used by the
//! terminal client and the tests.
mod registers;
mod virtual_display;

pub use registers::{
    BlendEffect, BlendMode, BlendRegisters, BlendTargets, RegisterSlots, WindowId, WindowRect,
};
pub use virtual_display::{BackgroundState, SpriteState, VirtualDisplay};

use crate::env::PlayerAvatar;
use crate::error::DriverFault;
use crate::palette::Rgb555;
use crate::types::{Region, ScreenPos, SectionId};

/// Background layers, back to front in the order the map uses them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Background {
    /// Top bar and name windows.
    Text,
    /// Region artwork.
    Map,
    /// Switch menu and dungeon preview.
    Overlay,
    /// Decorative frame behind the map.
    Frame,
}

impl Background {
    pub const COUNT: usize = 4;
    pub const ALL: [Background; Self::COUNT] = [
        Background::Text,
        Background::Map,
        Background::Overlay,
        Background::Frame,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Compressed graphics the driver knows how to fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetId {
    TopBarPalette,
    MapPalette,
    MapTiles,
    RegionTilemap(Region),
    FrameTiles,
    FrameTilemap,
    SwitchButtonTilemap,
    SwitchMenuTiles,
    SwitchMenuTilemap,
    MapEdgeTiles,
    MapEdgeTilemap,
    PreviewTiles(SectionId),
    PreviewTilemap(SectionId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteSheet {
    Cursor,
    PlayerMarker(PlayerAvatar),
    FlyIcon,
    DungeonIcon,
    MapEdge(u8),
}

/// Opaque handle returned by [`DisplayDriver::create_sprite`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteHandle(pub u16);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteFade {
    FromBlack,
    ToBlack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SoundCue {
    Scroll,
    ButtonHover,
    MenuSelect,
    MenuConfirm,
    MapOpen,
    MapEdgeSlide,
    MapClose,
    FlyHover,
    FlyConfirm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HelpSlot {
    Left,
    Right,
}

/// Top bar prompts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum HelpText {
    Blank,
    DPadMove,
    UpDownPick,
    AButtonGuide,
    AButtonSwitch,
    AButtonCancel,
    AButtonOk,
    AnyButtonClose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NameWindow {
    Map,
    Dungeon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextColor {
    White,
    Green,
    Red,
}

/// Rendering, sound and text primitives the region map drives.
pub trait DisplayDriver {
    /// Enables or disables the map's per-frame display callbacks.
    fn set_frame_callbacks(&mut self, enabled: bool);

    fn reset_backgrounds(&mut self);

    /// Destroys every sprite and resets sprite palettes.
    fn reset_sprites(&mut self);

    fn decompress_asset(&mut self, asset: AssetId) -> Vec<u16>;

    fn load_tiles(&mut self, background: Background, asset: AssetId);

    fn load_tilemap(&mut self, background: Background, tilemap: &[u16]);

    fn load_palette(&mut self, colors: &[Rgb555], offset: usize);

    fn show_background(&mut self, background: Background, visible: bool);

    fn set_blend_mode(&mut self, mode: BlendMode);

    fn set_blend_alpha(&mut self, first: u8, second: u8);

    fn set_blend_darkness(&mut self, level: u8);

    fn set_window(&mut self, window: WindowId, rect: Option<WindowRect>);

    fn registers(&self) -> BlendRegisters;

    fn restore_registers(&mut self, registers: &BlendRegisters);

    fn create_sprite(&mut self, sheet: SpriteSheet, pos: ScreenPos, priority: u8) -> SpriteHandle;

    fn move_sprite(&mut self, sprite: SpriteHandle, pos: ScreenPos);

    fn set_sprite_visible(&mut self, sprite: SpriteHandle, visible: bool);

    fn set_sprite_anim(&mut self, sprite: SpriteHandle, anim: u8);

    fn destroy_sprite(&mut self, sprite: SpriteHandle);

    fn begin_palette_fade(&mut self, fade: PaletteFade);

    fn is_fade_active(&self) -> bool;

    /// True while queued tile or tilemap copies are still pending.
    fn is_busy(&self) -> bool;

    fn play_sound(&mut self, cue: SoundCue);

    fn print_help(&mut self, slot: HelpSlot, text: HelpText);

    fn print_name(&mut self, window: NameWindow, text: &str, color: TextColor);

    fn clear_name(&mut self, window: NameWindow);

    fn print_preview_text(&mut self, name: &str, description: &str);

    fn clear_preview_text(&mut self);

    /// Irrecoverable condition raised since the last call, if any.
    fn take_fault(&mut self) -> Option<DriverFault> {
        None
    }
}
