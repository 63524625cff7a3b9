//! Sliding map edges played when the map opens and closes.

use super::scene::MapScene;
use crate::config::RegionMapConfig;
use crate::display::{
    AssetId, Background, BlendEffect, BlendMode, BlendRegisters, BlendTargets, DisplayDriver,
    HelpSlot, HelpText, PaletteFade, SoundCue, SpriteHandle, SpriteSheet, WindowId, WindowRect,
};
use crate::env::RegionMapEnv;
use crate::palette::Rgb555;
use crate::types::{Layer, RegionFilter, ScreenPos, SectionType};

const EDGE_COUNT: usize = RegionMapConfig::MAP_EDGE_COUNT;
/// Left edges start here and come back here when the map closes.
const EDGE_CLOSED_X: i16 = 104;
const EDGE_OPEN_LEFT_X: i16 = 0;
const EDGE_OPEN_RIGHT_X: i16 = 240;
const WINDOW_TOP: i16 = 16;
const WINDOW_BOTTOM: i16 = 160;
const FULL_WINDOW: WindowRect = WindowRect::new(0, WINDOW_TOP, 240, WINDOW_BOTTOM);
/// Colour index inside the top bar palette used to blank the map palettes.
const TOP_BAR_FILL_INDEX: usize = 15;
const BLANKED_PALETTE_ROWS: usize = 5;

/// Pixels moved per tick on the given slide step.
pub fn edge_speed(move_state: u8) -> i16 {
    match move_state {
        0..=6 => 8,
        7..=10 => 5,
        11..=14 => 3,
        15..=17 => 2,
        _ => 1,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MapEdge {
    x: i16,
    y: i16,
    sprite: Option<SpriteHandle>,
}

impl MapEdge {
    fn closed(index: usize) -> Self {
        Self {
            x: 32 * (index / 3) as i16 + EDGE_CLOSED_X,
            y: 64 * (index % 3) as i16 + 40,
            sprite: None,
        }
    }

    fn is_left(index: usize) -> bool {
        index < EDGE_COUNT / 2
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpeningStep {
    DisableCallbacks,
    LoadEdges(u8),
    LoadTilemap,
    FadeIn,
    ShowEdges,
    AwaitFade,
    SlideOut,
    RevealMarker,
    LightenMap,
    PrintHelp,
    BlankPalettes,
    SettleFrame,
    Brighten,
    RestoreRegisters,
    Finish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClosingStep {
    ClearTopBar,
    CreateEdges,
    ReloadPalette,
    HideMap,
    LightenMode,
    Darken,
    PrepareSlide,
    SlideIn,
    Finish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeAnimState {
    Opening(OpeningStep),
    Closing(ClosingStep),
    Done,
}

impl EdgeAnimState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeAnimState::Opening(_) => "opening",
            EdgeAnimState::Closing(_) => "closing",
            EdgeAnimState::Done => "done",
        }
    }
}

/// Six edge sprites that slide apart to reveal the map and back to hide it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapEdgeAnim {
    state: EdgeAnimState,
    edges: [MapEdge; EDGE_COUNT],
    move_state: u8,
    blend: u8,
}

impl MapEdgeAnim {
    /// Prepares the opening animation and takes register slot 0.
    pub fn opening(scene: &mut MapScene, driver: &mut dyn DisplayDriver) -> Self {
        let edges = std::array::from_fn(MapEdge::closed);
        if !scene.slots.save(0, driver.registers()) {
            tracing::warn!("register slot 0 already held when the map edges opened");
        }
        driver.restore_registers(&BlendRegisters::default());

        let anim = Self {
            state: EdgeAnimState::Opening(OpeningStep::DisableCallbacks),
            edges,
            move_state: 0,
            blend: 0,
        };
        driver.set_blend_mode(BlendMode::new(BlendTargets::BG1, BlendTargets::empty(), BlendEffect::None));
        driver.set_window(
            WindowId::Frame,
            Some(WindowRect::new(anim.edges[0].x + 8, WINDOW_TOP, anim.edges[3].x - 8, WINDOW_BOTTOM)),
        );
        driver.show_background(Background::Text, false);
        driver.show_background(Background::Frame, false);
        anim
    }

    /// Prepares the closing animation with the edges at their opened positions.
    pub fn closing() -> Self {
        let edges = std::array::from_fn(|index| MapEdge {
            x: if MapEdge::is_left(index) { EDGE_OPEN_LEFT_X } else { EDGE_OPEN_RIGHT_X },
            ..MapEdge::closed(index)
        });
        Self {
            state: EdgeAnimState::Closing(ClosingStep::ClearTopBar),
            edges,
            move_state: 0,
            blend: 0,
        }
    }

    pub fn state(&self) -> EdgeAnimState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == EdgeAnimState::Done
    }

    /// X of the top-left edge, which leads both slides.
    pub fn leading_edge_x(&self) -> i16 {
        self.edges[0].x
    }

    pub fn blend_level(&self) -> u8 {
        self.blend
    }

    /// Advances one tick; returns `true` once the animation has finished.
    pub fn tick(&mut self, scene: &mut MapScene, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) -> bool {
        match self.state {
            EdgeAnimState::Opening(step) => self.tick_opening(step, scene, env, driver),
            EdgeAnimState::Closing(step) => self.tick_closing(step, scene, driver),
            EdgeAnimState::Done => {}
        }
        self.is_done()
    }

    fn tick_opening(
        &mut self,
        step: OpeningStep,
        scene: &mut MapScene,
        env: &RegionMapEnv<'_>,
        driver: &mut dyn DisplayDriver,
    ) {
        let next = match step {
            OpeningStep::DisableCallbacks => {
                driver.set_frame_callbacks(false);
                OpeningStep::LoadEdges(0)
            }
            OpeningStep::LoadEdges(index) if usize::from(index) < EDGE_COUNT => {
                self.create_edge(usize::from(index), driver);
                OpeningStep::LoadEdges(index + 1)
            }
            OpeningStep::LoadEdges(_) => {
                driver.load_tiles(Background::Frame, AssetId::MapEdgeTiles);
                OpeningStep::LoadTilemap
            }
            OpeningStep::LoadTilemap => {
                let tilemap = driver.decompress_asset(AssetId::MapEdgeTilemap);
                driver.load_tilemap(Background::Frame, scene.layouts.widen_for(Background::Frame, &tilemap));
                OpeningStep::FadeIn
            }
            OpeningStep::FadeIn => {
                driver.begin_palette_fade(PaletteFade::FromBlack);
                driver.set_frame_callbacks(true);
                OpeningStep::ShowEdges
            }
            OpeningStep::ShowEdges => {
                driver.show_background(Background::Map, true);
                driver.show_background(Background::Frame, true);
                self.set_edges_visible(true, driver);
                self.update_window(driver);
                OpeningStep::AwaitFade
            }
            OpeningStep::AwaitFade => {
                if driver.is_fade_active() {
                    return;
                }
                driver.play_sound(SoundCue::MapOpen);
                OpeningStep::SlideOut
            }
            OpeningStep::SlideOut => {
                if !self.slide(-1, EDGE_OPEN_LEFT_X, driver) {
                    return;
                }
                OpeningStep::RevealMarker
            }
            OpeningStep::RevealMarker => {
                scene.marker.set_visible(true, driver);
                scene.set_cursor_visible(true, driver);
                OpeningStep::LightenMap
            }
            OpeningStep::LightenMap => {
                self.blend = RegionMapConfig::EDGE_DARK_LEVEL;
                self.apply_lighten(driver);
                driver.show_background(Background::Text, true);
                scene.icons.set_visibility(RegionFilter::Only(scene.active_region), true, driver);
                OpeningStep::PrintHelp
            }
            OpeningStep::PrintHelp => {
                driver.print_help(HelpSlot::Left, HelpText::DPadMove);
                let right = if scene.cursor.section_type(Layer::Dungeon) == SectionType::Visited {
                    HelpText::AButtonGuide
                } else {
                    HelpText::Blank
                };
                driver.print_help(HelpSlot::Right, right);
                OpeningStep::BlankPalettes
            }
            OpeningStep::BlankPalettes => {
                let top_bar = driver.decompress_asset(AssetId::TopBarPalette);
                let fill = Rgb555(top_bar.get(TOP_BAR_FILL_INDEX).copied().unwrap_or_default());
                for row in 0..BLANKED_PALETTE_ROWS {
                    driver.load_palette(&[fill], row * 16);
                }
                OpeningStep::SettleFrame
            }
            OpeningStep::SettleFrame => {
                driver.play_sound(SoundCue::MapEdgeSlide);
                OpeningStep::Brighten
            }
            OpeningStep::Brighten => {
                if self.blend == RegionMapConfig::EDGE_OPEN_LIGHT_LEVEL {
                    self.set_edges_visible(false, driver);
                    driver.set_blend_darkness(0);
                    OpeningStep::RestoreRegisters
                } else {
                    self.blend -= 1;
                    driver.set_blend_darkness(self.blend);
                    return;
                }
            }
            OpeningStep::RestoreRegisters => {
                match scene.slots.restore(0) {
                    Some(registers) => driver.restore_registers(&registers),
                    None => tracing::warn!("register slot 0 was empty when the map edges settled"),
                }
                scene.display_dungeon_name(env, driver);
                OpeningStep::Finish
            }
            OpeningStep::Finish => {
                self.destroy_edges(driver);
                self.state = EdgeAnimState::Done;
                tracing::debug!("map open animation finished");
                return;
            }
        };
        self.state = EdgeAnimState::Opening(next);
    }

    fn tick_closing(&mut self, step: ClosingStep, scene: &mut MapScene, driver: &mut dyn DisplayDriver) {
        let next = match step {
            ClosingStep::ClearTopBar => {
                driver.print_help(HelpSlot::Left, HelpText::Blank);
                driver.print_help(HelpSlot::Right, HelpText::Blank);
                ClosingStep::CreateEdges
            }
            ClosingStep::CreateEdges => {
                for index in 0..EDGE_COUNT {
                    self.create_edge(index, driver);
                }
                ClosingStep::ReloadPalette
            }
            ClosingStep::ReloadPalette => {
                let colors: Vec<Rgb555> = driver
                    .decompress_asset(AssetId::MapPalette)
                    .into_iter()
                    .map(Rgb555)
                    .collect();
                driver.load_palette(&colors, 0);
                ClosingStep::HideMap
            }
            ClosingStep::HideMap => {
                self.set_edges_visible(true, driver);
                scene.marker.set_visible(false, driver);
                scene.set_cursor_visible(false, driver);
                scene.icons.set_visibility(RegionFilter::All, false, driver);
                self.move_state = 0;
                self.blend = 0;
                ClosingStep::LightenMode
            }
            ClosingStep::LightenMode => {
                self.apply_lighten(driver);
                ClosingStep::Darken
            }
            ClosingStep::Darken => {
                if self.blend == RegionMapConfig::EDGE_DARK_LEVEL {
                    driver.set_blend_darkness(self.blend);
                    ClosingStep::PrepareSlide
                } else {
                    self.blend += 1;
                    driver.set_blend_darkness(self.blend);
                    return;
                }
            }
            ClosingStep::PrepareSlide => {
                driver.set_blend_mode(BlendMode::new(BlendTargets::BG1, BlendTargets::empty(), BlendEffect::None));
                self.update_window(driver);
                driver.play_sound(SoundCue::MapClose);
                ClosingStep::SlideIn
            }
            ClosingStep::SlideIn => {
                if !self.slide(1, EDGE_CLOSED_X, driver) {
                    return;
                }
                ClosingStep::Finish
            }
            ClosingStep::Finish => {
                self.destroy_edges(driver);
                self.state = EdgeAnimState::Done;
                tracing::debug!("map close animation finished");
                return;
            }
        };
        self.state = EdgeAnimState::Closing(next);
    }

    /// Moves the left edges by `direction * speed` and the right edges the
    /// other way; returns `true` when the leading edge already sits at `target`.
    fn slide(&mut self, direction: i16, target: i16, driver: &mut dyn DisplayDriver) -> bool {
        self.update_window(driver);
        if self.edges[0].x == target {
            return true;
        }
        let speed = edge_speed(self.move_state) * direction;
        for (index, edge) in self.edges.iter_mut().enumerate() {
            edge.x += if MapEdge::is_left(index) { speed } else { -speed };
            if let Some(sprite) = edge.sprite {
                driver.move_sprite(sprite, ScreenPos::new(edge.x, edge.y));
            }
        }
        self.move_state = self.move_state.saturating_add(1);
        false
    }

    fn update_window(&self, driver: &mut dyn DisplayDriver) {
        driver.set_window(
            WindowId::Frame,
            Some(WindowRect::new(self.edges[0].x, WINDOW_TOP, self.edges[3].x, WINDOW_BOTTOM)),
        );
    }

    fn apply_lighten(&self, driver: &mut dyn DisplayDriver) {
        driver.restore_registers(&BlendRegisters::default());
        driver.set_blend_mode(BlendMode::new(
            BlendTargets::BG0 | BlendTargets::BG3 | BlendTargets::BACKDROP,
            BlendTargets::BG1,
            BlendEffect::Lighten,
        ));
        driver.set_blend_darkness(self.blend);
        driver.set_window(WindowId::Frame, Some(FULL_WINDOW));
    }

    fn create_edge(&mut self, index: usize, driver: &mut dyn DisplayDriver) {
        let edge = &mut self.edges[index];
        let sprite = driver.create_sprite(SpriteSheet::MapEdge(index as u8), ScreenPos::new(edge.x, edge.y), 0);
        driver.set_sprite_visible(sprite, false);
        edge.sprite = Some(sprite);
    }

    fn set_edges_visible(&self, visible: bool, driver: &mut dyn DisplayDriver) {
        for sprite in self.edges.iter().filter_map(|edge| edge.sprite) {
            driver.set_sprite_visible(sprite, visible);
        }
    }

    /// Destroys the edge sprites, keeping their last positions.
    pub fn destroy_edges(&mut self, driver: &mut dyn DisplayDriver) {
        for edge in self.edges.iter_mut() {
            if let Some(sprite) = edge.sprite.take() {
                driver.destroy_sprite(sprite);
            }
        }
    }
}
