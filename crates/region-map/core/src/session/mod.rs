//! The region map session: one state machine per open map screen.
//!
//! A session owns its [`MapScene`] outright. Work that the main loop hands
//! off (icon loading, the edge animation, an overlay) is pushed as a [`Task`]
//! onto a small fixed stack; the top task receives each tick and popping it
//! resumes whatever was underneath. Where the session goes once the screen
//! closes is a [`Continuation`] value returned from [`RegionMapSession::tick`].
mod anim;
mod fly;
pub(crate) mod layout;
mod scene;

pub use anim::{ClosingStep, EdgeAnimState, MapEdgeAnim, OpeningStep, edge_speed};
pub use fly::{FlyChoice, FlyOverlaySession};
pub use layout::LayoutBuffers;
pub use scene::MapScene;

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::RegionMapConfig;
use crate::cursor::CursorEvent;
use crate::display::{
    AssetId, Background, BlendRegisters, DisplayDriver, HelpSlot, HelpText, PaletteFade,
};
use crate::env::{RegionMapEnv, WarpRequest};
use crate::error::SessionError;
use crate::icons::RegionIcons;
use crate::input::InputFrame;
use crate::marker::PlayerMarker;
use crate::overlay::{DungeonPreviewOverlay, Overlay, OverlayStatus, RegionSwitchMenu};
use crate::palette::{Rgb555, darken};
use crate::types::{Layer, Region, SectionType};

bitflags! {
    /// Features enabled for one session.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Permissions: u8 {
        const SWITCH_BUTTON    = 1 << 0;
        const MAP_PREVIEW      = 1 << 1;
        const OPEN_ANIM        = 1 << 2;
        const FLY_DESTINATIONS = 1 << 3;
    }
}

/// How the map is presented.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PresentationMode {
    /// Opened from the field or the bag: preview, switching and the edge animation.
    #[default]
    Normal,
    /// A wall map: look only.
    Wall,
    /// Picking a fly destination.
    Fly,
}

impl PresentationMode {
    pub fn permissions(self) -> Permissions {
        match self {
            PresentationMode::Normal => {
                Permissions::SWITCH_BUTTON | Permissions::MAP_PREVIEW | Permissions::OPEN_ANIM
            }
            PresentationMode::Wall => Permissions::empty(),
            PresentationMode::Fly => Permissions::FLY_DESTINATIONS,
        }
    }

    /// Where the game resumes when the map closes without a fly warp.
    pub fn default_exit(self) -> Continuation {
        match self {
            PresentationMode::Fly => Continuation::ReturnToPartyMenu,
            PresentationMode::Normal | PresentationMode::Wall => Continuation::ReturnToField,
        }
    }
}

/// Screen the game resumes after the map.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Continuation {
    #[default]
    ReturnToField,
    ReturnToPartyMenu,
    ReturnToBag,
}

/// Everything the caller decides before a session opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionRequest {
    pub mode: PresentationMode,
    /// Resumed once the map closes normally.
    pub exit: Continuation,
    /// Resumed when the session cannot be created.
    pub fallback: Continuation,
}

impl SessionRequest {
    pub fn new(mode: PresentationMode) -> Self {
        let exit = mode.default_exit();
        Self { mode, exit, fallback: exit }
    }

    pub fn with_exit(mut self, exit: Continuation) -> Self {
        self.exit = exit;
        self
    }

    pub fn with_fallback(mut self, fallback: Continuation) -> Self {
        self.fallback = fallback;
        self
    }
}

/// How a finished session hands control back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionExit {
    pub continuation: Continuation,
    /// Set when a fly destination was chosen.
    pub warp: Option<WarpRequest>,
}

impl SessionExit {
    pub fn new(continuation: Continuation) -> Self {
        Self { continuation, warp: None }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Finished(SessionExit),
}

/// Setup sequence run before the map is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenStep {
    ResetDisplay,
    LoadPalettes,
    LoadMapTiles,
    AwaitIdle,
    /// Decompressing the layout of the region with this index; one past the
    /// last region decompresses the frame.
    DecompressLayouts(usize),
    BufferBackground,
    DisplayNames,
    StartFade,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainStep {
    Spawn,
    Reveal,
    /// Fly only: the right help line.
    Prompt,
    AwaitReveal,
    Input,
}

/// Lifecycle of a session.
///
/// `Closing` runs the edge animation before the fade; sessions without the
/// animation go straight from the input loop to `FadeOut`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Opening(OpenStep),
    MainLoop(MainStep),
    Closing,
    FadeOut,
    Teardown,
    Finished(SessionExit),
}

impl Phase {
    /// Stable identifier used in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Phase::Opening(_) => "opening",
            Phase::MainLoop(_) => "main_loop",
            Phase::Closing => "closing",
            Phase::FadeOut => "fade_out",
            Phase::Teardown => "teardown",
            Phase::Finished(_) => "finished",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconLoadStep {
    DisableCallbacks,
    DungeonIcons,
    FlyIcons,
    FadeIn,
    EnableCallbacks,
    Finish,
}

/// Unit of work on the session's task stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    Main,
    LoadIcons(IconLoadStep),
    MapEdge,
    Overlay,
}

impl Task {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Task::Main => "main",
            Task::LoadIcons(_) => "load_icons",
            Task::MapEdge => "map_edge",
            Task::Overlay => "overlay",
        }
    }
}

type TaskStack = ArrayVec<Task, { RegionMapConfig::MAX_TASK_DEPTH }>;

/// One open region map screen.
#[derive(Clone, Debug)]
pub struct RegionMapSession {
    mode: PresentationMode,
    request: SessionRequest,
    config: RegionMapConfig,
    scene: MapScene,
    phase: Phase,
    tasks: TaskStack,
    edges: Option<MapEdgeAnim>,
    overlay: Option<Overlay>,
    fly: Option<FlyOverlaySession>,
}

impl RegionMapSession {
    /// Allocates the working buffers and prepares the first opening step.
    ///
    /// Nothing is drawn until the first [`tick`](Self::tick). When the buffers
    /// cannot be obtained the error carries `request.fallback`.
    pub fn open(
        request: SessionRequest,
        config: RegionMapConfig,
        env: &RegionMapEnv<'_>,
    ) -> Result<Self, SessionError> {
        let requested = LayoutBuffers::required_bytes();
        let allocation_failed = || SessionError::AllocationFailed {
            requested,
            budget: config.heap_budget,
            fallback: request.fallback,
        };
        if requested > config.heap_budget {
            tracing::warn!(requested, budget = config.heap_budget, "region map buffers exceed the heap budget");
            return Err(allocation_failed());
        }
        let layouts = LayoutBuffers::reserve().map_err(|error| {
            tracing::warn!(%error, "region map buffers could not be reserved");
            allocation_failed()
        })?;

        let mut permissions = request.mode.permissions();
        if config.force_switch_button {
            permissions |= Permissions::SWITCH_BUTTON;
        }

        let marker = PlayerMarker::init_from_overworld_position(env);
        let mut scene = MapScene::new(permissions, marker, layouts, env);
        scene.icons = RegionIcons::build(env, permissions);

        let mut tasks = TaskStack::new();
        tasks.push(Task::Main);

        tracing::info!(
            mode = %request.mode,
            region = %scene.active_region(),
            section = %scene.marker().section(),
            exit = %request.exit,
            "region map session opened"
        );

        Ok(Self {
            mode: request.mode,
            request,
            config,
            scene,
            phase: Phase::Opening(OpenStep::ResetDisplay),
            tasks,
            edges: None,
            overlay: None,
            fly: (request.mode == PresentationMode::Fly).then(FlyOverlaySession::new),
        })
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scene(&self) -> &MapScene {
        &self.scene
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn edge_anim(&self) -> Option<&MapEdgeAnim> {
        self.edges.as_ref()
    }

    pub fn fly(&self) -> Option<&FlyOverlaySession> {
        self.fly.as_ref()
    }

    /// Task currently receiving ticks.
    pub fn active_task(&self) -> Option<Task> {
        self.tasks.last().copied()
    }

    pub fn task_depth(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Runs one frame of the session.
    ///
    /// A driver fault ends the session: sprites are released and the error is
    /// returned. Ticking a finished session keeps returning its exit.
    pub fn tick(
        &mut self,
        input: &InputFrame,
        env: &RegionMapEnv<'_>,
        driver: &mut dyn DisplayDriver,
    ) -> Result<SessionStatus, SessionError> {
        if let Phase::Finished(exit) = self.phase {
            return Ok(SessionStatus::Finished(exit));
        }
        if let Some(fault) = driver.take_fault() {
            tracing::error!(%fault, phase = self.phase.as_str(), "display driver fault, aborting region map");
            self.abort(driver);
            return Err(fault.into());
        }

        match self.active_task() {
            Some(Task::Main) | None => self.tick_main(input, env, driver)?,
            Some(Task::LoadIcons(step)) => self.tick_icon_load(step, driver),
            Some(Task::MapEdge) => self.tick_map_edge(env, driver),
            Some(Task::Overlay) => self.tick_overlay(input, env, driver),
        }

        Ok(match self.phase {
            Phase::Finished(exit) => SessionStatus::Finished(exit),
            _ => SessionStatus::Running,
        })
    }

    fn push_task(&mut self, task: Task) -> Result<(), SessionError> {
        self.tasks
            .try_push(task)
            .map_err(|_| SessionError::TaskStackOverflow { depth: self.tasks.len() })?;
        tracing::trace!(task = task.as_str(), depth = self.tasks.len(), "task pushed");
        Ok(())
    }

    fn pop_task(&mut self) {
        if let Some(task) = self.tasks.pop() {
            tracing::trace!(task = task.as_str(), depth = self.tasks.len(), "task finished");
        }
    }

    fn tick_main(
        &mut self,
        input: &InputFrame,
        env: &RegionMapEnv<'_>,
        driver: &mut dyn DisplayDriver,
    ) -> Result<(), SessionError> {
        match self.phase {
            Phase::Opening(step) => {
                let next = self.tick_opening(step, env, driver);
                self.phase = next;
            }
            Phase::MainLoop(step) => match self.mode {
                PresentationMode::Fly => self.tick_fly_loop(step, input, env, driver)?,
                PresentationMode::Normal | PresentationMode::Wall => {
                    self.tick_map_loop(step, input, env, driver)?
                }
            },
            Phase::Closing => {
                self.edges = Some(MapEdgeAnim::closing());
                self.push_task(Task::MapEdge)?;
                self.phase = Phase::FadeOut;
            }
            Phase::FadeOut => {
                driver.begin_palette_fade(PaletteFade::ToBlack);
                self.phase = Phase::Teardown;
            }
            Phase::Teardown => {
                if !driver.is_fade_active() {
                    self.teardown(env, driver);
                }
            }
            Phase::Finished(_) => {}
        }
        Ok(())
    }

    fn tick_opening(&mut self, step: OpenStep, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) -> Phase {
        let next = match step {
            OpenStep::ResetDisplay => {
                driver.set_frame_callbacks(false);
                driver.reset_backgrounds();
                driver.reset_sprites();
                OpenStep::LoadPalettes
            }
            OpenStep::LoadPalettes => {
                let top_bar = palette_asset(driver, AssetId::TopBarPalette);
                driver.load_palette(&top_bar, TOP_BAR_PALETTE_OFFSET);

                let mut map = palette_asset(driver, AssetId::MapPalette);
                let range = RegionMapConfig::MAP_PALETTE_DARKEN_RANGE;
                if let Some(colors) = map.get_mut(range) {
                    darken(colors, RegionMapConfig::MAP_PALETTE_DARKEN_PERCENT);
                }
                driver.load_palette(&map, 0);

                if self.mode != PresentationMode::Normal {
                    let fill = top_bar.get(TOP_BAR_FILL_INDEX).copied().unwrap_or(Rgb555::BLACK);
                    for row in 0..BLANKED_PALETTE_ROWS {
                        driver.load_palette(&[fill], row * 16);
                    }
                }
                OpenStep::LoadMapTiles
            }
            OpenStep::LoadMapTiles => {
                driver.load_tiles(Background::Map, AssetId::MapTiles);
                if self.mode != PresentationMode::Normal {
                    driver.load_tiles(Background::Frame, AssetId::FrameTiles);
                }
                OpenStep::AwaitIdle
            }
            OpenStep::AwaitIdle => {
                if driver.is_busy() {
                    return Phase::Opening(OpenStep::AwaitIdle);
                }
                OpenStep::DecompressLayouts(0)
            }
            OpenStep::DecompressLayouts(index) => {
                match Region::from_index(index) {
                    Some(region) => self.scene.layouts.decompress_region(region, driver),
                    None => self.scene.layouts.decompress_frame(driver),
                }
                if index < Region::COUNT {
                    OpenStep::DecompressLayouts(index + 1)
                } else {
                    OpenStep::BufferBackground
                }
            }
            OpenStep::BufferBackground => {
                self.scene.buffer_region(self.scene.active_region, driver);
                if self.mode == PresentationMode::Normal {
                    driver.load_tilemap(Background::Frame, &[]);
                } else {
                    driver.load_tilemap(Background::Frame, self.scene.layouts.frame_buffer());
                }
                OpenStep::DisplayNames
            }
            OpenStep::DisplayNames => {
                self.scene.display_names(env, driver);
                OpenStep::StartFade
            }
            OpenStep::StartFade => {
                if self.scene.permissions.contains(Permissions::OPEN_ANIM) {
                    driver.show_background(Background::Text, false);
                    driver.show_background(Background::Frame, false);
                }
                driver.begin_palette_fade(PaletteFade::FromBlack);
                driver.set_frame_callbacks(true);
                tracing::debug!(mode = %self.mode, "region map graphics loaded");
                return Phase::MainLoop(MainStep::Spawn);
            }
        };
        Phase::Opening(next)
    }

    fn tick_icon_load(&mut self, step: IconLoadStep, driver: &mut dyn DisplayDriver) {
        let next = match step {
            IconLoadStep::DisableCallbacks => {
                driver.set_frame_callbacks(false);
                IconLoadStep::DungeonIcons
            }
            IconLoadStep::DungeonIcons => {
                self.scene.icons.spawn_dungeon_icons(driver);
                IconLoadStep::FlyIcons
            }
            IconLoadStep::FlyIcons => {
                self.scene.icons.spawn_fly_icons(driver);
                IconLoadStep::FadeIn
            }
            IconLoadStep::FadeIn => {
                driver.begin_palette_fade(PaletteFade::FromBlack);
                IconLoadStep::EnableCallbacks
            }
            IconLoadStep::EnableCallbacks => {
                driver.set_frame_callbacks(true);
                IconLoadStep::Finish
            }
            IconLoadStep::Finish => {
                tracing::debug!(
                    dungeons = self.scene.icons.dungeon_icons().len(),
                    fly = self.scene.icons.fly_icons().len(),
                    skipped = self.scene.icons.skipped(),
                    "region map icons loaded"
                );
                self.pop_task();
                return;
            }
        };
        if let Some(top) = self.tasks.last_mut() {
            *top = Task::LoadIcons(next);
        }
    }

    fn tick_map_edge(&mut self, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) {
        let done = match self.edges.as_mut() {
            Some(anim) => anim.tick(&mut self.scene, env, driver),
            None => true,
        };
        if done {
            if let Some(mut anim) = self.edges.take() {
                anim.destroy_edges(driver);
            }
            self.pop_task();
        }
    }

    fn tick_overlay(&mut self, input: &InputFrame, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) {
        let status = match self.overlay.as_mut() {
            Some(overlay) => overlay.tick(input, &mut self.scene, env, driver),
            None => OverlayStatus::Closed,
        };
        if status == OverlayStatus::Closed {
            if let Some(overlay) = self.overlay.take() {
                tracing::debug!(overlay = overlay.as_str(), region = %self.scene.active_region, "overlay closed");
            }
            self.pop_task();
        }
    }

    fn open_overlay(&mut self, overlay: Overlay) -> Result<(), SessionError> {
        tracing::debug!(overlay = overlay.as_str(), "overlay opened");
        self.overlay = Some(overlay);
        self.push_task(Task::Overlay)
    }

    fn start_open_anim(&mut self, driver: &mut dyn DisplayDriver) -> Result<(), SessionError> {
        self.edges = Some(MapEdgeAnim::opening(&mut self.scene, driver));
        self.push_task(Task::MapEdge)
    }

    /// Phase after the input loop ends: the edge animation when permitted, else straight to the fade.
    fn close_transition(&self) -> Phase {
        if self.scene.permissions.contains(Permissions::OPEN_ANIM) {
            Phase::Closing
        } else {
            Phase::FadeOut
        }
    }

    fn select_cancels(&self) -> bool {
        self.config.select_closes_field_map && self.request.exit == Continuation::ReturnToField
    }

    fn tick_map_loop(
        &mut self,
        step: MainStep,
        input: &InputFrame,
        env: &RegionMapEnv<'_>,
        driver: &mut dyn DisplayDriver,
    ) -> Result<(), SessionError> {
        let next = match step {
            MainStep::Spawn => {
                self.scene.spawn_cursor(false, driver);
                self.scene.marker.spawn(env.overworld.player_avatar(), driver);
                self.push_task(Task::LoadIcons(IconLoadStep::DisableCallbacks))?;
                MainStep::Reveal
            }
            MainStep::Reveal => {
                if self.scene.permissions.contains(Permissions::OPEN_ANIM) {
                    self.start_open_anim(driver)?;
                } else {
                    self.scene.show_backgrounds(driver);
                    driver.print_help(HelpSlot::Left, HelpText::DPadMove);
                    driver.print_help(HelpSlot::Right, HelpText::Blank);
                    self.scene.marker.set_visible(true, driver);
                    self.scene.set_cursor_visible(true, driver);
                    self.scene.reveal_region_icons(driver);
                }
                MainStep::AwaitReveal
            }
            MainStep::Prompt => MainStep::AwaitReveal,
            MainStep::AwaitReveal => {
                if driver.is_fade_active() || driver.is_busy() {
                    return Ok(());
                }
                self.scene.display_names(env, driver);
                MainStep::Input
            }
            MainStep::Input => {
                let controls = self.scene.cursor_controls(self.select_cancels());
                let region = self.scene.active_region;
                let event = self.scene.cursor.handle_input(input, controls, env, region);
                self.scene.sync_cursor_sprite(driver);
                match event {
                    CursorEvent::None | CursorEvent::MoveContinue => {}
                    CursorEvent::MoveStart => self.scene.cursor.reset_snap(),
                    CursorEvent::MoveEnd => {
                        self.scene.display_names(env, driver);
                        self.scene.move_end_sound(env, driver);
                        if let Some(help) = self.scene.move_end_help() {
                            driver.print_help(HelpSlot::Right, help);
                        }
                    }
                    CursorEvent::Action => {
                        if self.scene.cursor.section_type(Layer::Dungeon) == SectionType::Visited
                            && self.scene.permissions.contains(Permissions::MAP_PREVIEW)
                        {
                            let preview = DungeonPreviewOverlay::open(&mut self.scene, env, driver);
                            self.open_overlay(Overlay::DungeonPreview(preview))?;
                        }
                    }
                    CursorEvent::SwitchRegion => {
                        let menu = RegionSwitchMenu::open(&mut self.scene, driver);
                        self.open_overlay(Overlay::SwitchMenu(menu))?;
                    }
                    CursorEvent::Cancel => {
                        self.phase = self.close_transition();
                        tracing::debug!(phase = self.phase.as_str(), "region map closing");
                        return Ok(());
                    }
                }
                MainStep::Input
            }
        };
        self.phase = Phase::MainLoop(next);
        Ok(())
    }

    fn tick_fly_loop(
        &mut self,
        step: MainStep,
        input: &InputFrame,
        env: &RegionMapEnv<'_>,
        driver: &mut dyn DisplayDriver,
    ) -> Result<(), SessionError> {
        let next = match step {
            MainStep::Spawn => {
                self.scene.spawn_cursor(true, driver);
                self.scene.marker.spawn(env.overworld.player_avatar(), driver);
                self.scene.marker.set_visible(true, driver);
                self.push_task(Task::LoadIcons(IconLoadStep::DisableCallbacks))?;
                MainStep::Reveal
            }
            MainStep::Reveal => {
                if self.scene.permissions.contains(Permissions::OPEN_ANIM) {
                    self.start_open_anim(driver)?;
                } else {
                    self.scene.show_backgrounds(driver);
                    driver.print_help(HelpSlot::Left, HelpText::DPadMove);
                    self.scene.reveal_region_icons(driver);
                }
                MainStep::Prompt
            }
            MainStep::Prompt => {
                driver.print_help(HelpSlot::Right, HelpText::AButtonOk);
                MainStep::AwaitReveal
            }
            MainStep::AwaitReveal => {
                if driver.is_fade_active() {
                    return Ok(());
                }
                self.scene.display_names(env, driver);
                MainStep::Input
            }
            MainStep::Input => {
                let controls = self.scene.cursor_controls(false);
                let region = self.scene.active_region;
                let event = self.scene.cursor.handle_input(input, controls, env, region);
                self.scene.sync_cursor_sprite(driver);
                match event {
                    CursorEvent::None | CursorEvent::MoveContinue => {}
                    CursorEvent::MoveStart => self.scene.cursor.reset_snap(),
                    CursorEvent::MoveEnd => {
                        self.scene.cursor.reset_snap();
                        self.scene.display_names(env, driver);
                        if let Some(fly) = self.fly.as_ref() {
                            fly.move_end(&self.scene, env, driver);
                        }
                    }
                    CursorEvent::Action => {
                        let choice = match self.fly.as_mut() {
                            Some(fly) => fly.confirm(&self.scene, env, driver),
                            None => FlyChoice::Ignored,
                        };
                        if choice.closes_map() {
                            self.phase = self.close_transition();
                            tracing::debug!(?choice, phase = self.phase.as_str(), "fly map closing");
                            return Ok(());
                        }
                    }
                    CursorEvent::SwitchRegion => {
                        let menu = RegionSwitchMenu::open(&mut self.scene, driver);
                        self.open_overlay(Overlay::SwitchMenu(menu))?;
                    }
                    CursorEvent::Cancel => {
                        self.phase = Phase::FadeOut;
                        tracing::debug!("fly map cancelled");
                        return Ok(());
                    }
                }
                MainStep::Input
            }
        };
        self.phase = Phase::MainLoop(next);
        Ok(())
    }

    fn release(&mut self, driver: &mut dyn DisplayDriver) {
        if let Some(mut anim) = self.edges.take() {
            anim.destroy_edges(driver);
        }
        self.overlay = None;
        self.scene.despawn(driver);
        self.scene.slots.clear();
        driver.restore_registers(&BlendRegisters::default());
        driver.set_frame_callbacks(false);
        self.tasks.clear();
    }

    fn teardown(&mut self, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) {
        self.release(driver);
        let exit = match self.fly.as_ref() {
            Some(fly) => fly.finish(env, self.request.exit),
            None => SessionExit::new(self.request.exit),
        };
        tracing::info!(
            continuation = %exit.continuation,
            warp = ?exit.warp,
            region = %self.scene.active_region,
            "region map session closed"
        );
        self.phase = Phase::Finished(exit);
    }

    fn abort(&mut self, driver: &mut dyn DisplayDriver) {
        self.release(driver);
        self.phase = Phase::Finished(SessionExit::new(Continuation::ReturnToField));
    }
}

const TOP_BAR_PALETTE_OFFSET: usize = 0xC0;
const TOP_BAR_FILL_INDEX: usize = 15;
const BLANKED_PALETTE_ROWS: usize = 5;

fn palette_asset(driver: &mut dyn DisplayDriver, asset: AssetId) -> Vec<Rgb555> {
    driver.decompress_asset(asset).into_iter().map(Rgb555).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_permissions() {
        assert!(PresentationMode::Normal.permissions().contains(Permissions::OPEN_ANIM));
        assert!(PresentationMode::Normal.permissions().contains(Permissions::MAP_PREVIEW));
        assert_eq!(PresentationMode::Wall.permissions(), Permissions::empty());
        assert_eq!(PresentationMode::Fly.permissions(), Permissions::FLY_DESTINATIONS);
    }

    #[test]
    fn request_defaults_follow_the_mode() {
        let fly = SessionRequest::new(PresentationMode::Fly);
        assert_eq!(fly.exit, Continuation::ReturnToPartyMenu);
        assert_eq!(fly.fallback, Continuation::ReturnToPartyMenu);

        let bag = SessionRequest::new(PresentationMode::Normal)
            .with_exit(Continuation::ReturnToBag)
            .with_fallback(Continuation::ReturnToBag);
        assert_eq!(bag.exit, Continuation::ReturnToBag);
        assert_eq!(bag.fallback, Continuation::ReturnToBag);
    }

    #[test]
    fn continuation_names_are_snake_case() {
        assert_eq!(Continuation::ReturnToPartyMenu.to_string(), "return_to_party_menu");
        assert_eq!("fly".parse::<PresentationMode>(), Ok(PresentationMode::Fly));
        assert_eq!("WALL".parse::<PresentationMode>(), Ok(PresentationMode::Wall));
    }

    #[test]
    fn phase_names() {
        assert_eq!(Phase::Opening(OpenStep::ResetDisplay).as_str(), "opening");
        assert_eq!(Phase::FadeOut.as_str(), "fade_out");
        assert_eq!(Phase::Finished(SessionExit::new(Continuation::ReturnToBag)).as_str(), "finished");
    }
}
