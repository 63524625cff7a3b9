use crate::config::RegionMapConfig;
use crate::display::{
    Background, BlendEffect, BlendMode, BlendRegisters, BlendTargets, DisplayDriver, HelpSlot,
    HelpText, WindowId, WindowRect,
};
use crate::env::{DungeonDescriptor, PreviewAssets, RegionMapEnv};
use crate::input::{Buttons, InputFrame};
use crate::palette::{Tone, tinted};
use crate::session::MapScene;
use crate::types::{Layer, SectionId};

use super::OverlayStatus;

const SAVE_SLOT: usize = 0;
/// Palette offset the preview image uses.
const PREVIEW_PALETTE_OFFSET: usize = 0xD0;
/// Frame the highlight window grows into.
const PREVIEW_FRAME: WindowRect = WindowRect::new(16, 32, 224, 136);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewStep {
    DisableCallbacks,
    LoadGraphics,
    InitScreen,
    CopyTilemap,
    ShowImage,
    EnableCallbacks,
    ZoomIn,
    Flavor(FlavorStep),
    ZoomOut,
    Finish,
    Done,
}

/// Sub-steps of the tint-and-text sequence shown once the image is fully open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlavorStep {
    SetTone,
    Delay,
    ClearText,
    Tint,
    AwaitInput,
}

/// Window growing from the cursor cell to the preview frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewZoom {
    window: WindowRect,
    increments: [i16; 4],
    counter: i16,
}

impl PreviewZoom {
    /// Starts from the 8 px square under the cursor cell `(x, y)`.
    ///
    /// Cells outside the grid are clamped onto its edge.
    pub fn from_cell(x: i32, y: i32) -> Self {
        let left = 8 * grid_axis(x, RegionMapConfig::MAP_WIDTH) + 32;
        let top = 8 * grid_axis(y, RegionMapConfig::MAP_HEIGHT) + 24;
        let window = WindowRect::new(left, top, left + 8, top + 8);
        let steps = RegionMapConfig::PREVIEW_ZOOM_STEPS;
        Self {
            window,
            increments: [
                (PREVIEW_FRAME.left - window.left) / steps,
                (PREVIEW_FRAME.top - window.top) / steps,
                (PREVIEW_FRAME.right - window.right) / steps,
                (PREVIEW_FRAME.bottom - window.bottom) / steps,
            ],
            counter: 0,
        }
    }

    pub fn window(&self) -> WindowRect {
        self.window
    }

    pub fn increments(&self) -> [i16; 4] {
        self.increments
    }

    /// Grows one step; `false` once fully open.
    fn grow(&mut self) -> bool {
        if self.counter >= RegionMapConfig::PREVIEW_ZOOM_STEPS {
            return false;
        }
        self.shift(1);
        self.counter += 1;
        true
    }

    /// Shrinks one step; `false` once fully closed.
    fn shrink(&mut self) -> bool {
        if self.counter == 0 {
            return false;
        }
        self.shift(-1);
        self.counter -= 1;
        true
    }

    fn shift(&mut self, sign: i16) {
        let [left, top, right, bottom] = self.increments;
        self.window.left += sign * left;
        self.window.top += sign * top;
        self.window.right += sign * right;
        self.window.bottom += sign * bottom;
    }
}

/// Zooming dungeon picture with its name and flavor text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DungeonPreviewOverlay {
    step: PreviewStep,
    section: SectionId,
    descriptor: DungeonDescriptor,
    assets: PreviewAssets,
    zoom: PreviewZoom,
    dim: u8,
    tone: Tone,
    timer: u8,
}

impl DungeonPreviewOverlay {
    /// Opens the preview for the dungeon under the cursor.
    pub fn open(scene: &mut MapScene, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) -> Self {
        let section = scene.cursor.section(Layer::Dungeon);
        let descriptor = env.dungeons.descriptor_or_placeholder(section);
        let assets = env.dungeons.preview_or_placeholder(section);
        let position = scene.cursor.position();

        if !scene.slots.save(SAVE_SLOT, driver.registers()) {
            tracing::warn!(slot = SAVE_SLOT, "register slot already held when the preview opened");
        }
        driver.restore_registers(&BlendRegisters::default());
        scene.clear_names(driver);
        tracing::debug!(%section, name = %descriptor.name, "dungeon preview opened");

        Self {
            step: PreviewStep::DisableCallbacks,
            section,
            descriptor,
            assets,
            zoom: PreviewZoom::from_cell(position.x, position.y),
            dim: 0,
            tone: Tone::PREVIEW_START,
            timer: 0,
        }
    }

    pub fn step(&self) -> PreviewStep {
        self.step
    }

    pub fn section(&self) -> SectionId {
        self.section
    }

    pub fn descriptor(&self) -> &DungeonDescriptor {
        &self.descriptor
    }

    pub fn zoom(&self) -> &PreviewZoom {
        &self.zoom
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn tick(
        &mut self,
        input: &InputFrame,
        scene: &mut MapScene,
        env: &RegionMapEnv<'_>,
        driver: &mut dyn DisplayDriver,
    ) -> OverlayStatus {
        self.step = match self.step {
            PreviewStep::DisableCallbacks => {
                driver.set_frame_callbacks(false);
                PreviewStep::LoadGraphics
            }
            PreviewStep::LoadGraphics => {
                driver.load_tiles(Background::Overlay, self.assets.tiles);
                driver.load_palette(&self.assets.palette, PREVIEW_PALETTE_OFFSET);
                PreviewStep::InitScreen
            }
            PreviewStep::InitScreen => {
                driver.restore_registers(&BlendRegisters::default());
                driver.set_blend_mode(BlendMode::new(
                    BlendTargets::BG0 | BlendTargets::OBJ,
                    BlendTargets::empty(),
                    BlendEffect::Darken,
                ));
                driver.set_blend_darkness(self.dim);
                driver.set_window(WindowId::Highlight, Some(self.zoom.window()));
                driver.print_help(HelpSlot::Right, HelpText::AnyButtonClose);
                PreviewStep::CopyTilemap
            }
            PreviewStep::CopyTilemap => {
                let tilemap = driver.decompress_asset(self.assets.tilemap);
                driver.load_tilemap(Background::Overlay, &tilemap);
                PreviewStep::ShowImage
            }
            PreviewStep::ShowImage => {
                driver.show_background(Background::Overlay, true);
                PreviewStep::EnableCallbacks
            }
            PreviewStep::EnableCallbacks => {
                driver.set_frame_callbacks(true);
                PreviewStep::ZoomIn
            }
            PreviewStep::ZoomIn => {
                if self.zoom.grow() {
                    if self.dim < RegionMapConfig::PREVIEW_DIM_LEVEL {
                        self.dim += 1;
                    }
                    self.apply_zoom(driver);
                    PreviewStep::ZoomIn
                } else {
                    PreviewStep::Flavor(FlavorStep::SetTone)
                }
            }
            PreviewStep::Flavor(step) => self.tick_flavor(step, input, driver),
            PreviewStep::ZoomOut => {
                if self.zoom.shrink() {
                    self.dim = self.dim.saturating_sub(1);
                    self.apply_zoom(driver);
                    PreviewStep::ZoomOut
                } else {
                    PreviewStep::Finish
                }
            }
            PreviewStep::Finish => {
                self.close(scene, env, driver);
                PreviewStep::Done
            }
            PreviewStep::Done => PreviewStep::Done,
        };

        if self.step == PreviewStep::Done {
            OverlayStatus::Closed
        } else {
            OverlayStatus::Running
        }
    }

    fn tick_flavor(&mut self, step: FlavorStep, input: &InputFrame, driver: &mut dyn DisplayDriver) -> PreviewStep {
        let next = match step {
            FlavorStep::SetTone => {
                self.tone = Tone::PREVIEW_START;
                FlavorStep::Delay
            }
            FlavorStep::Delay => {
                let waited = self.timer;
                self.timer += 1;
                if waited > RegionMapConfig::PREVIEW_FLAVOR_DELAY {
                    self.timer = 0;
                    FlavorStep::ClearText
                } else {
                    FlavorStep::Delay
                }
            }
            FlavorStep::ClearText => {
                driver.clear_preview_text();
                FlavorStep::Tint
            }
            FlavorStep::Tint => {
                let next = if self.timer > RegionMapConfig::PREVIEW_TEXT_AFTER {
                    driver.print_preview_text(&self.descriptor.name, &self.descriptor.description);
                    FlavorStep::AwaitInput
                } else {
                    if self.timer > RegionMapConfig::PREVIEW_TINT_AFTER {
                        self.tone = self.tone.darkened(Tone::PREVIEW_STEP);
                        driver.load_palette(&tinted(&self.assets.palette, self.tone), PREVIEW_PALETTE_OFFSET);
                    }
                    FlavorStep::Tint
                };
                self.timer = self.timer.saturating_add(1);
                next
            }
            FlavorStep::AwaitInput => {
                if input.new_press(Buttons::A | Buttons::B) {
                    driver.clear_preview_text();
                    driver.load_palette(&self.assets.palette, PREVIEW_PALETTE_OFFSET);
                    return PreviewStep::ZoomOut;
                }
                FlavorStep::AwaitInput
            }
        };
        PreviewStep::Flavor(next)
    }

    fn apply_zoom(&self, driver: &mut dyn DisplayDriver) {
        driver.set_window(WindowId::Highlight, Some(self.zoom.window()));
        driver.set_blend_darkness(self.dim);
    }

    fn close(&mut self, scene: &mut MapScene, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) {
        driver.show_background(Background::Overlay, false);
        match scene.slots.restore(SAVE_SLOT) {
            Some(registers) => driver.restore_registers(&registers),
            None => driver.restore_registers(&BlendRegisters::default()),
        }
        scene.display_names(env, driver);
        driver.print_help(HelpSlot::Right, HelpText::AButtonGuide);
        tracing::debug!(section = %self.section, "dungeon preview closed");
    }
}

/// Clamps a cell coordinate to `[0, extent)` and narrows it for window maths.
fn grid_axis(cell: i32, extent: i32) -> i16 {
    debug_assert!((0..extent).contains(&cell), "cell {cell} outside the grid");
    i16::try_from(cell.clamp(0, extent - 1)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_starts_on_the_cursor_cell() {
        let zoom = PreviewZoom::from_cell(3, 4);
        assert_eq!(zoom.window(), WindowRect::new(56, 56, 64, 64));
        assert_eq!(zoom.increments(), [-5, -3, 20, 9]);
    }

    #[test]
    fn zoom_out_retraces_zoom_in() {
        let mut zoom = PreviewZoom::from_cell(10, 7);
        let start = zoom.window();
        let mut grown = 0;
        while zoom.grow() {
            grown += 1;
        }
        assert_eq!(grown, RegionMapConfig::PREVIEW_ZOOM_STEPS);
        assert!(zoom.window().width() > start.width());
        while zoom.shrink() {}
        assert_eq!(zoom.window(), start);
    }

    #[test]
    fn increments_truncate_towards_zero() {
        // left 8*21+32 = 200, (16-200)/8 = -23; bottom 8*14+24+8 = 144, (136-144)/8 = -1.
        let zoom = PreviewZoom::from_cell(21, 14);
        assert_eq!(zoom.increments()[0], -23);
        assert_eq!(zoom.increments()[3], -1);
    }

    #[test]
    fn grid_axis_keeps_cells_on_the_grid() {
        assert_eq!(grid_axis(0, RegionMapConfig::MAP_WIDTH), 0);
        assert_eq!(grid_axis(21, RegionMapConfig::MAP_WIDTH), 21);
        assert_eq!(grid_axis(14, RegionMapConfig::MAP_HEIGHT), 14);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn off_grid_cells_clamp_to_the_edge() {
        assert_eq!(PreviewZoom::from_cell(70_000, -3), PreviewZoom::from_cell(21, 0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside the grid")]
    fn off_grid_cells_are_rejected_in_debug_builds() {
        PreviewZoom::from_cell(22, 0);
    }
}
