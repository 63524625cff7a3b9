use std::collections::BTreeMap;

use super::{
    AssetId, Background, BlendMode, BlendRegisters, DisplayDriver, HelpSlot, HelpText,
    NameWindow, PaletteFade, SoundCue, SpriteHandle, SpriteSheet, TextColor, WindowId,
    WindowRect,
};
use crate::error::DriverFault;
use crate::palette::Rgb555;
use crate::types::ScreenPos;

const PALETTE_SIZE: usize = 512;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteState {
    pub sheet: SpriteSheet,
    pub pos: ScreenPos,
    pub visible: bool,
    pub anim: u8,
    pub priority: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackgroundState {
    pub visible: bool,
    pub tiles: Option<AssetId>,
    pub tilemap: Vec<u16>,
}

/// Software display that records every call in inspectable state.
///
/// Palette fades and tile copies take a configurable number of frames;
/// [`VirtualDisplay::end_frame`] advances them once per tick.
#[derive(Clone, Debug)]
pub struct VirtualDisplay {
    assets: BTreeMap<AssetId, Vec<u16>>,
    backgrounds: [BackgroundState; Background::COUNT],
    palette: Vec<Rgb555>,
    registers: BlendRegisters,
    sprites: BTreeMap<SpriteHandle, SpriteState>,
    next_sprite: u16,
    fade: Option<(PaletteFade, u8)>,
    faded_out: bool,
    fade_frames: u8,
    pending_copies: u8,
    copy_latency: u8,
    frame_callbacks: bool,
    sounds: Vec<SoundCue>,
    help: [HelpText; 2],
    names: [Option<(String, TextColor)>; 2],
    preview_text: Option<(String, String)>,
    fault: Option<DriverFault>,
    frame: u64,
}

impl VirtualDisplay {
    pub const DEFAULT_FADE_FRAMES: u8 = 8;
    pub const DEFAULT_COPY_LATENCY: u8 = 1;

    pub fn new() -> Self {
        Self {
            assets: BTreeMap::new(),
            backgrounds: Default::default(),
            palette: vec![Rgb555::BLACK; PALETTE_SIZE],
            registers: BlendRegisters::default(),
            sprites: BTreeMap::new(),
            next_sprite: 0,
            fade: None,
            faded_out: true,
            fade_frames: Self::DEFAULT_FADE_FRAMES,
            pending_copies: 0,
            copy_latency: Self::DEFAULT_COPY_LATENCY,
            frame_callbacks: false,
            sounds: Vec::new(),
            help: [HelpText::Blank; 2],
            names: [None, None],
            preview_text: None,
            fault: None,
            frame: 0,
        }
    }

    pub fn with_fade_frames(mut self, frames: u8) -> Self {
        self.fade_frames = frames;
        self
    }

    pub fn with_copy_latency(mut self, frames: u8) -> Self {
        self.copy_latency = frames;
        self
    }

    /// Makes `data` the decompressed contents of `asset`; unknown assets decompress to nothing.
    pub fn register_asset(&mut self, asset: AssetId, data: Vec<u16>) {
        self.assets.insert(asset, data);
    }

    /// Advances fades and pending copies by one frame.
    pub fn end_frame(&mut self) {
        self.frame += 1;
        self.pending_copies = self.pending_copies.saturating_sub(1);
        if let Some((kind, remaining)) = self.fade {
            if remaining <= 1 {
                self.fade = None;
                self.faded_out = kind == PaletteFade::ToBlack;
            } else {
                self.fade = Some((kind, remaining - 1));
            }
        }
    }

    /// Queues a fault for the next [`DisplayDriver::take_fault`].
    pub fn inject_fault(&mut self, fault: DriverFault) {
        self.fault = Some(fault);
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// True once a fade to black has completed and nothing has faded back in.
    pub fn is_faded_out(&self) -> bool {
        self.faded_out
    }

    pub fn background(&self, background: Background) -> &BackgroundState {
        &self.backgrounds[background.index()]
    }

    pub fn palette(&self) -> &[Rgb555] {
        &self.palette
    }

    pub fn sprite(&self, handle: SpriteHandle) -> Option<&SpriteState> {
        self.sprites.get(&handle)
    }

    pub fn sprites(&self) -> impl Iterator<Item = (SpriteHandle, &SpriteState)> {
        self.sprites.iter().map(|(handle, state)| (*handle, state))
    }

    pub fn visible_sprites(&self, sheet: SpriteSheet) -> impl Iterator<Item = &SpriteState> {
        self.sprites
            .values()
            .filter(move |state| state.visible && state.sheet == sheet)
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn help(&self, slot: HelpSlot) -> HelpText {
        match slot {
            HelpSlot::Left => self.help[0],
            HelpSlot::Right => self.help[1],
        }
    }

    pub fn name(&self, window: NameWindow) -> Option<(&str, TextColor)> {
        self.names[name_index(window)]
            .as_ref()
            .map(|(text, color)| (text.as_str(), *color))
    }

    pub fn preview_text(&self) -> Option<(&str, &str)> {
        self.preview_text
            .as_ref()
            .map(|(name, description)| (name.as_str(), description.as_str()))
    }

    pub fn sounds(&self) -> &[SoundCue] {
        &self.sounds
    }

    /// Drains the sound log.
    pub fn take_sounds(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sounds)
    }

    pub fn frame_callbacks(&self) -> bool {
        self.frame_callbacks
    }

    fn queue_copy(&mut self) {
        self.pending_copies = self.pending_copies.max(self.copy_latency);
    }
}

impl Default for VirtualDisplay {
    fn default() -> Self {
        Self::new()
    }
}

fn name_index(window: NameWindow) -> usize {
    match window {
        NameWindow::Map => 0,
        NameWindow::Dungeon => 1,
    }
}

impl DisplayDriver for VirtualDisplay {
    fn set_frame_callbacks(&mut self, enabled: bool) {
        self.frame_callbacks = enabled;
    }

    fn reset_backgrounds(&mut self) {
        self.backgrounds = Default::default();
    }

    fn reset_sprites(&mut self) {
        self.sprites.clear();
    }

    fn decompress_asset(&mut self, asset: AssetId) -> Vec<u16> {
        self.assets.get(&asset).cloned().unwrap_or_default()
    }

    fn load_tiles(&mut self, background: Background, asset: AssetId) {
        self.backgrounds[background.index()].tiles = Some(asset);
        self.queue_copy();
    }

    fn load_tilemap(&mut self, background: Background, tilemap: &[u16]) {
        self.backgrounds[background.index()].tilemap = tilemap.to_vec();
        self.queue_copy();
    }

    fn load_palette(&mut self, colors: &[Rgb555], offset: usize) {
        for (slot, color) in self.palette.iter_mut().skip(offset).zip(colors) {
            *slot = *color;
        }
    }

    fn show_background(&mut self, background: Background, visible: bool) {
        self.backgrounds[background.index()].visible = visible;
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.registers.mode = mode;
    }

    fn set_blend_alpha(&mut self, first: u8, second: u8) {
        self.registers.alpha = (first, second);
    }

    fn set_blend_darkness(&mut self, level: u8) {
        self.registers.darkness = level;
    }

    fn set_window(&mut self, window: WindowId, rect: Option<WindowRect>) {
        self.registers.windows[window.index()] = rect;
    }

    fn registers(&self) -> BlendRegisters {
        self.registers
    }

    fn restore_registers(&mut self, registers: &BlendRegisters) {
        self.registers = *registers;
    }

    fn create_sprite(&mut self, sheet: SpriteSheet, pos: ScreenPos, priority: u8) -> SpriteHandle {
        let handle = SpriteHandle(self.next_sprite);
        self.next_sprite = self.next_sprite.wrapping_add(1);
        self.sprites.insert(
            handle,
            SpriteState {
                sheet,
                pos,
                visible: true,
                anim: 0,
                priority,
            },
        );
        handle
    }

    fn move_sprite(&mut self, sprite: SpriteHandle, pos: ScreenPos) {
        if let Some(state) = self.sprites.get_mut(&sprite) {
            state.pos = pos;
        }
    }

    fn set_sprite_visible(&mut self, sprite: SpriteHandle, visible: bool) {
        if let Some(state) = self.sprites.get_mut(&sprite) {
            state.visible = visible;
        }
    }

    fn set_sprite_anim(&mut self, sprite: SpriteHandle, anim: u8) {
        if let Some(state) = self.sprites.get_mut(&sprite) {
            state.anim = anim;
        }
    }

    fn destroy_sprite(&mut self, sprite: SpriteHandle) {
        self.sprites.remove(&sprite);
    }

    fn begin_palette_fade(&mut self, fade: PaletteFade) {
        if self.fade_frames == 0 {
            self.fade = None;
            self.faded_out = fade == PaletteFade::ToBlack;
        } else {
            self.fade = Some((fade, self.fade_frames));
            self.faded_out = false;
        }
    }

    fn is_fade_active(&self) -> bool {
        self.fade.is_some()
    }

    fn is_busy(&self) -> bool {
        self.pending_copies > 0
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    fn print_help(&mut self, slot: HelpSlot, text: HelpText) {
        match slot {
            HelpSlot::Left => self.help[0] = text,
            HelpSlot::Right => self.help[1] = text,
        }
    }

    fn print_name(&mut self, window: NameWindow, text: &str, color: TextColor) {
        self.names[name_index(window)] = Some((text.to_string(), color));
    }

    fn clear_name(&mut self, window: NameWindow) {
        self.names[name_index(window)] = None;
    }

    fn print_preview_text(&mut self, name: &str, description: &str) {
        self.preview_text = Some((name.to_string(), description.to_string()));
    }

    fn clear_preview_text(&mut self) {
        self.preview_text = None;
    }

    fn take_fault(&mut self) -> Option<DriverFault> {
        self.fault.take()
    }
}
