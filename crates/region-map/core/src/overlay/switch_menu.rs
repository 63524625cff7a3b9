use crate::config::RegionMapConfig;
use crate::display::{
    AssetId, Background, BlendEffect, BlendMode, BlendRegisters, BlendTargets, DisplayDriver,
    HelpSlot, HelpText, SoundCue, WindowId, WindowRect,
};
use crate::env::RegionMapEnv;
use crate::input::{Buttons, InputFrame};
use crate::session::MapScene;
use crate::types::Region;

use super::OverlayStatus;

/// Register slot the menu borrows for the map's blend state.
const SAVE_SLOT: usize = 0;
const COLUMN_STRIDE: usize = 3;
const WRAP: usize = 2 * COLUMN_STRIDE;

/// How the menu was left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    Confirmed(Region),
    Cancelled(Region),
}

impl SwitchOutcome {
    pub fn region(self) -> Region {
        match self {
            SwitchOutcome::Confirmed(region) | SwitchOutcome::Cancelled(region) => region,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchStep {
    Begin,
    LoadTiles,
    LoadTilemap,
    ClearNames,
    BlendIn,
    EnableCallbacks,
    FadeIn,
    Dim,
    Input,
    Undim,
    FadeOut,
    ShowCursor,
    Finish,
    Done,
}

/// Modal picker over the regions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionSwitchMenu {
    step: SwitchStep,
    max_selection: usize,
    two_columns: bool,
    y_offset: i16,
    selection: usize,
    opened_with: Region,
    outcome: Option<SwitchOutcome>,
    alpha: u8,
    dim: u8,
}

impl RegionSwitchMenu {
    /// Opens the menu over `scene`, saving the map's registers.
    pub fn open(scene: &mut MapScene, driver: &mut dyn DisplayDriver) -> Self {
        if !scene.slots.save(SAVE_SLOT, driver.registers()) {
            tracing::warn!(slot = SAVE_SLOT, "register slot already held when the switch menu opened");
        }
        driver.print_help(HelpSlot::Right, HelpText::AButtonOk);
        scene.set_cursor_visible(false, driver);
        tracing::debug!(region = %scene.active_region, "switch menu opened");

        Self::with_entries(Region::COUNT - 1, scene.active_region)
    }

    /// Menu state over `max_selection + 1` entries, highlighting `opened_with`.
    fn with_entries(max_selection: usize, opened_with: Region) -> Self {
        Self {
            step: SwitchStep::Begin,
            max_selection,
            two_columns: max_selection >= COLUMN_STRIDE,
            y_offset: if max_selection == 1 { 6 } else { 5 },
            selection: opened_with.index(),
            opened_with,
            outcome: None,
            alpha: 0,
            dim: 0,
        }
    }

    pub fn step(&self) -> SwitchStep {
        self.step
    }

    pub fn selection(&self) -> Region {
        Region::from_index(self.selection).unwrap_or(self.opened_with)
    }

    pub fn outcome(&self) -> Option<SwitchOutcome> {
        self.outcome
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn dim_level(&self) -> u8 {
        self.dim
    }

    /// Highlight rectangle around the current entry.
    pub fn highlight(&self) -> WindowRect {
        let top = 8 * (self.y_offset + 4 * (self.selection % COLUMN_STRIDE) as i16);
        let (left, right) = if self.two_columns {
            let left = 56 + (self.selection / COLUMN_STRIDE) as i16 * 64;
            (left, left + 64)
        } else {
            (72, 168)
        };
        WindowRect::new(left, top, right, top + 32)
    }

    pub fn tick(
        &mut self,
        input: &InputFrame,
        scene: &mut MapScene,
        env: &RegionMapEnv<'_>,
        driver: &mut dyn DisplayDriver,
    ) -> OverlayStatus {
        self.step = match self.step {
            SwitchStep::Begin => {
                driver.set_frame_callbacks(false);
                driver.print_help(HelpSlot::Left, HelpText::UpDownPick);
                SwitchStep::LoadTiles
            }
            SwitchStep::LoadTiles => {
                driver.load_tiles(Background::Overlay, AssetId::SwitchMenuTiles);
                SwitchStep::LoadTilemap
            }
            SwitchStep::LoadTilemap => {
                let tilemap = driver.decompress_asset(AssetId::SwitchMenuTilemap);
                driver.load_tilemap(Background::Overlay, scene.layouts.widen_for(Background::Overlay, &tilemap));
                SwitchStep::ClearNames
            }
            SwitchStep::ClearNames => {
                scene.clear_names(driver);
                SwitchStep::BlendIn
            }
            SwitchStep::BlendIn => {
                self.apply_alpha_mode(driver);
                driver.show_background(Background::Overlay, true);
                SwitchStep::EnableCallbacks
            }
            SwitchStep::EnableCallbacks => {
                driver.set_frame_callbacks(true);
                SwitchStep::FadeIn
            }
            SwitchStep::FadeIn => {
                if self.alpha < RegionMapConfig::SWITCH_MENU_ALPHA_MAX {
                    driver.set_blend_alpha(RegionMapConfig::SWITCH_MENU_ALPHA_MAX - self.alpha, self.alpha);
                    self.alpha += RegionMapConfig::SWITCH_MENU_ALPHA_STEP;
                    SwitchStep::FadeIn
                } else {
                    self.draw_highlight(driver);
                    SwitchStep::Dim
                }
            }
            SwitchStep::Dim => {
                if self.dim < RegionMapConfig::SWITCH_MENU_DIM_LEVEL {
                    self.dim += 1;
                    driver.set_blend_darkness(self.dim);
                    SwitchStep::Dim
                } else {
                    SwitchStep::Input
                }
            }
            SwitchStep::Input => match self.handle_input(input, scene, driver) {
                Some(outcome) => {
                    self.outcome = Some(outcome);
                    scene.switch_to(outcome.region(), env, driver);
                    tracing::debug!(?outcome, "switch menu resolved");
                    SwitchStep::Undim
                }
                None => SwitchStep::Input,
            },
            SwitchStep::Undim => {
                if self.dim != 0 {
                    self.dim -= 1;
                    driver.set_blend_darkness(self.dim);
                    SwitchStep::Undim
                } else {
                    driver.set_blend_darkness(0);
                    self.apply_alpha_mode(driver);
                    SwitchStep::FadeOut
                }
            }
            SwitchStep::FadeOut => {
                if self.alpha >= RegionMapConfig::SWITCH_MENU_ALPHA_STEP {
                    self.alpha -= RegionMapConfig::SWITCH_MENU_ALPHA_STEP;
                    driver.set_blend_alpha(RegionMapConfig::SWITCH_MENU_ALPHA_MAX - self.alpha, self.alpha);
                    SwitchStep::FadeOut
                } else {
                    SwitchStep::ShowCursor
                }
            }
            SwitchStep::ShowCursor => {
                scene.set_cursor_visible(true, driver);
                SwitchStep::Finish
            }
            SwitchStep::Finish => {
                self.close(scene, env, driver);
                SwitchStep::Done
            }
            SwitchStep::Done => SwitchStep::Done,
        };

        if self.step == SwitchStep::Done {
            OverlayStatus::Closed
        } else {
            OverlayStatus::Running
        }
    }

    /// One tick of the selection loop; returns the outcome once A or B resolves it.
    fn handle_input(
        &mut self,
        input: &InputFrame,
        scene: &mut MapScene,
        driver: &mut dyn DisplayDriver,
    ) -> Option<SwitchOutcome> {
        let moves = self.navigate(input);
        for _ in 0..moves {
            driver.play_sound(SoundCue::MenuSelect);
        }

        if let Some(outcome) = self.resolve(input) {
            driver.play_sound(SoundCue::MenuConfirm);
            return Some(outcome);
        }

        let highlighted = self.selection();
        if moves > 0 {
            scene.buffer_region(highlighted, driver);
            driver.print_help(HelpSlot::Right, HelpText::AButtonOk);
            scene.icons.show_only(highlighted, driver);
        }
        scene.marker.set_visible(highlighted == scene.home_region(), driver);
        driver.set_window(WindowId::Highlight, Some(self.highlight()));
        None
    }

    /// Applies the D-pad presses of this tick; returns how many moved the selection.
    fn navigate(&mut self, input: &InputFrame) -> usize {
        let mut moves = 0;
        if input.new_press(Buttons::UP) {
            self.selection = if self.selection == 0 { self.max_selection } else { self.selection - 1 };
            moves += 1;
        }
        if input.new_press(Buttons::DOWN) {
            self.selection = if self.selection == self.max_selection { 0 } else { self.selection + 1 };
            moves += 1;
        }
        if input.new_press(Buttons::LEFT | Buttons::RIGHT) && self.two_columns {
            let across = (self.selection + COLUMN_STRIDE) % WRAP;
            if across <= self.max_selection {
                self.selection = across;
                moves += 1;
            }
        }
        moves
    }

    /// A commits the highlighted region once the dim ramp has settled; B restores the opening region.
    fn resolve(&mut self, input: &InputFrame) -> Option<SwitchOutcome> {
        if input.new_press(Buttons::A) && self.dim == RegionMapConfig::SWITCH_MENU_DIM_LEVEL {
            return Some(SwitchOutcome::Confirmed(self.selection()));
        }
        if input.new_press(Buttons::B) {
            self.selection = self.opened_with.index();
            return Some(SwitchOutcome::Cancelled(self.opened_with));
        }
        None
    }

    fn apply_alpha_mode(&self, driver: &mut dyn DisplayDriver) {
        driver.restore_registers(&BlendRegisters::default());
        driver.set_blend_mode(BlendMode::new(
            BlendTargets::BG2,
            BlendTargets::BG0 | BlendTargets::BG1 | BlendTargets::BG3 | BlendTargets::OBJ,
            BlendEffect::Alpha,
        ));
        driver.set_blend_alpha(RegionMapConfig::SWITCH_MENU_ALPHA_MAX - self.alpha, self.alpha);
    }

    fn draw_highlight(&self, driver: &mut dyn DisplayDriver) {
        driver.restore_registers(&BlendRegisters::default());
        driver.set_blend_mode(BlendMode::new(
            BlendTargets::BG0 | BlendTargets::BG2 | BlendTargets::OBJ,
            BlendTargets::empty(),
            BlendEffect::Darken,
        ));
        driver.set_window(WindowId::Highlight, Some(self.highlight()));
    }

    fn close(&mut self, scene: &mut MapScene, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) {
        driver.show_background(Background::Overlay, false);
        match scene.slots.restore(SAVE_SLOT) {
            Some(registers) => driver.restore_registers(&registers),
            None => driver.restore_registers(&BlendRegisters::default()),
        }
        driver.print_help(HelpSlot::Left, HelpText::DPadMove);
        driver.print_help(HelpSlot::Right, HelpText::AButtonSwitch);
        scene.display_names(env, driver);
    }
}
