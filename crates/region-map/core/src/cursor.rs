//! Map cursor: grid position, step animation, section caches and snapping.

use crate::config::RegionMapConfig;
use crate::env::RegionMapEnv;
use crate::input::{Buttons, InputFrame};
use crate::session::Permissions;
use crate::types::{Direction, Layer, Position, Region, ScreenPos, SectionId, SectionType};

/// Result of feeding one tick of input to the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorEvent {
    None,
    MoveStart,
    MoveContinue,
    MoveEnd,
    Action,
    SwitchRegion,
    Cancel,
}

/// Fixed points the cursor can jump to with Start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    PlayerMarker,
    SwitchButton,
    CancelButton,
}

impl Anchor {
    /// Cycle order; the index into this array is the cursor's snap index.
    pub const CYCLE: [Anchor; 3] = [
        Anchor::PlayerMarker,
        Anchor::SwitchButton,
        Anchor::CancelButton,
    ];
}

/// Anchors available for the current region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapTargets {
    /// Marker position when the player's marker is in the displayed region.
    pub player: Option<Position>,
    pub switch_button: bool,
}

impl SnapTargets {
    fn position(&self, anchor: Anchor) -> Option<Position> {
        match anchor {
            Anchor::PlayerMarker => self.player,
            Anchor::SwitchButton => self.switch_button.then_some(RegionMapConfig::SWITCH_CELL),
            Anchor::CancelButton => Some(RegionMapConfig::CANCEL_CELL),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    position: Position,
    /// Sub-cell sprite offset accumulated during a step.
    offset: (i16, i16),
    move_vector: (i16, i16),
    move_ticks_remaining: u8,
    sections: [SectionId; Layer::COUNT],
    section_types: [SectionType; Layer::COUNT],
    snap_index: usize,
}

impl Cursor {
    /// Places the cursor at `position` (clamped to the grid) and fills its caches.
    pub fn new(position: Position, env: &RegionMapEnv<'_>, region: Region) -> Self {
        let position = Position::new(
            position.x.clamp(0, RegionMapConfig::MAP_WIDTH - 1),
            position.y.clamp(0, RegionMapConfig::MAP_HEIGHT - 1),
        );
        let mut cursor = Self {
            position,
            offset: (0, 0),
            move_vector: (0, 0),
            move_ticks_remaining: 0,
            sections: [SectionId::NONE; Layer::COUNT],
            section_types: [SectionType::None; Layer::COUNT],
            snap_index: 0,
        };
        cursor.refresh(env, region);
        cursor
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn section(&self, layer: Layer) -> SectionId {
        self.sections[layer.index()]
    }

    pub fn section_type(&self, layer: Layer) -> SectionType {
        self.section_types[layer.index()]
    }

    pub fn is_moving(&self) -> bool {
        self.move_ticks_remaining > 0
    }

    pub fn snap_index(&self) -> usize {
        self.snap_index
    }

    pub fn is_on_cancel(&self) -> bool {
        self.position == RegionMapConfig::CANCEL_CELL
    }

    pub fn is_on_switch(&self) -> bool {
        self.position == RegionMapConfig::SWITCH_CELL
    }

    /// Sprite position including the in-flight step offset.
    pub fn screen_position(&self) -> ScreenPos {
        let cell = |c: i32| (c as i16) * RegionMapConfig::CELL_PX + RegionMapConfig::CURSOR_ORIGIN_PX;
        ScreenPos::new(
            cell(self.position.x) + self.offset.0,
            cell(self.position.y) + self.offset.1,
        )
    }

    /// Starts a one-cell step; returns [`CursorEvent::None`] at the grid edge or mid-step.
    pub fn begin_move(&mut self, direction: Direction) -> CursorEvent {
        let (dx, dy) = direction.delta();
        self.begin_step(dx, dy)
    }

    /// Starts a step from the held D-pad buttons, allowing diagonals.
    ///
    /// Down wins over Up and Left wins over Right when both are held.
    pub fn begin_move_held(&mut self, held: Buttons) -> CursorEvent {
        let mut dx = 0;
        let mut dy = 0;
        if held.contains(Buttons::UP) && self.position.y > 0 {
            dy = -1;
        }
        if held.contains(Buttons::DOWN) && self.position.y < RegionMapConfig::MAP_HEIGHT - 1 {
            dy = 1;
        }
        if held.contains(Buttons::RIGHT) && self.position.x < RegionMapConfig::MAP_WIDTH - 1 {
            dx = 1;
        }
        if held.contains(Buttons::LEFT) && self.position.x > 0 {
            dx = -1;
        }
        self.begin_step(dx, dy)
    }

    fn begin_step(&mut self, dx: i32, dy: i32) -> CursorEvent {
        if self.is_moving() || (dx == 0 && dy == 0) {
            return CursorEvent::None;
        }
        let target = Position::new(self.position.x + dx, self.position.y + dy);
        if !RegionMapConfig::contains(target) {
            return CursorEvent::None;
        }

        self.move_vector = (
            dx as i16 * RegionMapConfig::CURSOR_STEP_PX,
            dy as i16 * RegionMapConfig::CURSOR_STEP_PX,
        );
        self.move_ticks_remaining = RegionMapConfig::CURSOR_MOVE_TICKS;
        CursorEvent::MoveStart
    }

    /// Advances an in-flight step, committing it on its last tick.
    pub fn tick(&mut self, env: &RegionMapEnv<'_>, region: Region) -> CursorEvent {
        if !self.is_moving() {
            return CursorEvent::None;
        }

        self.offset.0 += self.move_vector.0;
        self.offset.1 += self.move_vector.1;
        self.move_ticks_remaining -= 1;
        if self.move_ticks_remaining > 0 {
            return CursorEvent::MoveContinue;
        }

        self.position.x += i32::from(self.move_vector.0.signum());
        self.position.y += i32::from(self.move_vector.1.signum());
        self.offset = (0, 0);
        self.move_vector = (0, 0);
        self.refresh(env, region);
        CursorEvent::MoveEnd
    }

    /// Classifies an A press at the current cell.
    pub fn confirm(&self, permissions: Permissions) -> CursorEvent {
        if self.is_on_cancel() {
            CursorEvent::Cancel
        } else if self.is_on_switch() && permissions.contains(Permissions::SWITCH_BUTTON) {
            CursorEvent::SwitchRegion
        } else {
            CursorEvent::Action
        }
    }

    pub fn reset_snap(&mut self) {
        self.snap_index = 0;
    }

    /// Jumps to the next available anchor and refreshes the caches.
    pub fn snap_to_anchor(
        &mut self,
        targets: SnapTargets,
        env: &RegionMapEnv<'_>,
        region: Region,
    ) -> Anchor {
        let count = Anchor::CYCLE.len();
        let mut anchor = Anchor::CancelButton;
        for _ in 0..count {
            self.snap_index = (self.snap_index + 1) % count;
            let candidate = Anchor::CYCLE[self.snap_index];
            if let Some(position) = targets.position(candidate) {
                anchor = candidate;
                self.position = position;
                break;
            }
        }

        self.offset = (0, 0);
        self.move_vector = (0, 0);
        self.move_ticks_remaining = 0;
        self.refresh(env, region);
        tracing::debug!(?anchor, position = ?self.position, "cursor snapped");
        anchor
    }

    /// Recomputes the section and type caches for both layers.
    pub fn refresh(&mut self, env: &RegionMapEnv<'_>, region: Region) {
        for layer in Layer::ALL {
            let section = env.section_at(region, layer, self.position);
            self.sections[layer.index()] = section;
            self.section_types[layer.index()] = env.section_type(layer, section);
        }
    }

    /// Polls one tick of input.
    ///
    /// An in-flight step always runs to completion before buttons are read.
    /// Buttons take precedence over the D-pad; Start snaps and reports
    /// [`CursorEvent::MoveEnd`] so callers refresh names and help text.
    pub fn handle_input(
        &mut self,
        input: &InputFrame,
        controls: CursorControls,
        env: &RegionMapEnv<'_>,
        region: Region,
    ) -> CursorEvent {
        if self.is_moving() {
            return self.tick(env, region);
        }

        if input.new_press(Buttons::A) {
            self.confirm(controls.permissions)
        } else if input.new_press(Buttons::B) {
            CursorEvent::Cancel
        } else if input.repeat(Buttons::START) {
            self.snap_to_anchor(controls.snap, env, region);
            CursorEvent::MoveEnd
        } else if input.new_press(Buttons::SELECT) && controls.select_cancels {
            CursorEvent::Cancel
        } else {
            self.begin_move_held(input.held)
        }
    }
}

/// Session facts the cursor needs to interpret buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorControls {
    pub permissions: Permissions,
    pub snap: SnapTargets,
    pub select_cancels: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        DungeonDescriptor, DungeonOracle, FlyDestination, FlyOracle, MapKind, MapLocation,
        MapSectionLookup, OverworldOracle, PreviewAssets, RegionLayout, SectionMetadata,
        SectionTable, VisitLog,
    };

    struct NoData;

    impl DungeonOracle for NoData {
        fn descriptor(&self, _section: SectionId) -> Option<&DungeonDescriptor> {
            None
        }

        fn preview(&self, _section: SectionId) -> Option<&PreviewAssets> {
            None
        }
    }

    impl FlyOracle for NoData {
        fn destination(&self, _section: SectionId) -> Option<FlyDestination> {
            None
        }
    }

    impl OverworldOracle for NoData {
        fn current_map_kind(&self) -> MapKind {
            MapKind::Town
        }

        fn current_location(&self) -> MapLocation {
            MapLocation::default()
        }

        fn escape_warp_location(&self) -> MapLocation {
            MapLocation::default()
        }

        fn dynamic_warp_location(&self) -> MapLocation {
            MapLocation::default()
        }
    }

    fn lookup() -> MapSectionLookup {
        let sections = SectionTable::new([
            (SectionId(0x01), SectionMetadata::new("Seashore City")),
            (SectionId(0x0C), SectionMetadata::new("Route 49")),
            (SectionId(0x1F), SectionMetadata::new("Merson Cave")),
        ])
        .unwrap();
        let mut rijon = RegionLayout::empty();
        rijon.set(Layer::Surface, Position::new(1, 0), SectionId(0x01)).unwrap();
        rijon.set(Layer::Dungeon, Position::new(1, 0), SectionId(0x1F)).unwrap();
        rijon.set(Layer::Surface, Position::new(2, 0), SectionId(0x0C)).unwrap();
        rijon.set(Layer::Surface, Position::new(21, 13), SectionId(0x0C)).unwrap();
        MapSectionLookup::new(sections, [(Region::Rijon, rijon)]).unwrap()
    }

    fn with_env<R>(f: impl FnOnce(&RegionMapEnv<'_>) -> R) -> R {
        let lookup = lookup();
        let mut visits = VisitLog::new();
        visits.visit(Layer::Surface, SectionId(0x01));
        let env = RegionMapEnv::new(&lookup, &NoData, &NoData, &NoData, &visits);
        f(&env)
    }

    fn step(cursor: &mut Cursor, direction: Direction, env: &RegionMapEnv<'_>) -> CursorEvent {
        if cursor.begin_move(direction) != CursorEvent::MoveStart {
            return CursorEvent::None;
        }
        let mut last = CursorEvent::None;
        while cursor.is_moving() {
            last = cursor.tick(env, Region::Rijon);
        }
        last
    }

    #[test]
    fn basic_pan_commits_on_the_fourth_tick() {
        with_env(|env| {
            let mut cursor = Cursor::new(Position::ORIGIN, env, Region::Rijon);
            assert_eq!(cursor.begin_move(Direction::Right), CursorEvent::MoveStart);

            let events: Vec<_> = (0..4).map(|_| cursor.tick(env, Region::Rijon)).collect();
            assert_eq!(
                events,
                vec![
                    CursorEvent::MoveContinue,
                    CursorEvent::MoveContinue,
                    CursorEvent::MoveContinue,
                    CursorEvent::MoveEnd
                ]
            );
            assert_eq!(cursor.position(), Position::new(1, 0));
            assert_eq!(cursor.tick(env, Region::Rijon), CursorEvent::None);
        });
    }

    #[test]
    fn sprite_interpolates_two_pixels_per_tick() {
        with_env(|env| {
            let mut cursor = Cursor::new(Position::ORIGIN, env, Region::Rijon);
            assert_eq!(cursor.screen_position(), ScreenPos::new(36, 36));
            cursor.begin_move(Direction::Right);
            cursor.tick(env, Region::Rijon);
            assert_eq!(cursor.screen_position(), ScreenPos::new(38, 36));
            cursor.tick(env, Region::Rijon);
            cursor.tick(env, Region::Rijon);
            cursor.tick(env, Region::Rijon);
            assert_eq!(cursor.screen_position(), ScreenPos::new(44, 36));
        });
    }

    #[test]
    fn edge_clamp_is_a_no_op() {
        with_env(|env| {
            let mut cursor = Cursor::new(Position::new(21, 0), env, Region::Rijon);
            assert_eq!(cursor.begin_move(Direction::Right), CursorEvent::None);
            assert_eq!(cursor.begin_move(Direction::Up), CursorEvent::None);
            assert_eq!(cursor.position(), Position::new(21, 0));
            assert!(!cursor.is_moving());
        });
    }

    #[test]
    fn committed_positions_stay_in_bounds_and_caches_stay_fresh() {
        with_env(|env| {
            let mut cursor = Cursor::new(Position::new(11, 7), env, Region::Rijon);
            let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
            let mut seed: u32 = 0x2545_f491;
            for _ in 0..2_000 {
                seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let direction = directions[(seed >> 28) as usize % 4];
                let before = cursor.position();
                let event = step(&mut cursor, direction, env);
                let after = cursor.position();

                assert!((0..RegionMapConfig::MAP_WIDTH).contains(&after.x));
                assert!((0..RegionMapConfig::MAP_HEIGHT).contains(&after.y));
                if event == CursorEvent::None {
                    assert_eq!(before, after);
                }
                for layer in Layer::ALL {
                    assert_eq!(
                        cursor.section(layer),
                        env.section_at(Region::Rijon, layer, after)
                    );
                }
            }
        });
    }

    #[test]
    fn caches_follow_both_layers() {
        with_env(|env| {
            let mut cursor = Cursor::new(Position::ORIGIN, env, Region::Rijon);
            assert_eq!(cursor.section(Layer::Surface), SectionId::NONE);
            assert_eq!(cursor.section_type(Layer::Surface), SectionType::None);

            step(&mut cursor, Direction::Right, env);
            assert_eq!(cursor.section(Layer::Surface), SectionId(0x01));
            assert_eq!(cursor.section_type(Layer::Surface), SectionType::Visited);
            assert_eq!(cursor.section(Layer::Dungeon), SectionId(0x1F));
            assert_eq!(cursor.section_type(Layer::Dungeon), SectionType::NotVisited);
        });
    }

    #[test]
    fn diagonal_holds_move_both_axes() {
        with_env(|env| {
            let mut cursor = Cursor::new(Position::new(5, 5), env, Region::Rijon);
            let held = Buttons::UP | Buttons::DOWN | Buttons::LEFT | Buttons::RIGHT;
            assert_eq!(cursor.begin_move_held(held), CursorEvent::MoveStart);
            while cursor.is_moving() {
                cursor.tick(env, Region::Rijon);
            }
            assert_eq!(cursor.position(), Position::new(4, 6));
        });
    }

    #[test]
    fn confirm_recognises_buttons() {
        with_env(|env| {
            let cancel = Cursor::new(RegionMapConfig::CANCEL_CELL, env, Region::Rijon);
            assert_eq!(cancel.confirm(Permissions::empty()), CursorEvent::Cancel);

            let switch = Cursor::new(RegionMapConfig::SWITCH_CELL, env, Region::Rijon);
            assert_eq!(switch.confirm(Permissions::SWITCH_BUTTON), CursorEvent::SwitchRegion);
            assert_eq!(switch.confirm(Permissions::MAP_PREVIEW), CursorEvent::Action);

            let plain = Cursor::new(Position::new(3, 3), env, Region::Rijon);
            assert_eq!(plain.confirm(Permissions::all()), CursorEvent::Action);
        });
    }

    #[test]
    fn snap_cycle_visits_every_permitted_anchor_once() {
        with_env(|env| {
            let marker = Position::new(1, 0);
            let cases = [
                (Some(marker), true, 3),
                (Some(marker), false, 2),
                (None, true, 2),
                (None, false, 1),
            ];
            for (player, switch_button, expected) in cases {
                let targets = SnapTargets {
                    player,
                    switch_button,
                };
                let mut cursor = Cursor::new(Position::new(9, 9), env, Region::Rijon);
                let mut seen = Vec::new();
                for _ in 0..expected {
                    seen.push(cursor.snap_to_anchor(targets, env, Region::Rijon));
                }
                let unique: std::collections::HashSet<_> = seen.iter().copied().collect();
                assert_eq!(unique.len(), expected, "{seen:?}");
                if player.is_none() {
                    assert!(!seen.contains(&Anchor::PlayerMarker));
                }
                // The next snap starts the cycle over.
                assert_eq!(cursor.snap_to_anchor(targets, env, Region::Rijon), seen[0]);
            }
        });
    }

    #[test]
    fn snap_refreshes_caches() {
        with_env(|env| {
            let mut cursor = Cursor::new(Position::new(1, 0), env, Region::Rijon);
            let targets = SnapTargets {
                player: Some(Position::new(1, 0)),
                switch_button: false,
            };
            assert_eq!(cursor.snap_to_anchor(targets, env, Region::Rijon), Anchor::CancelButton);
            assert_eq!(cursor.position(), RegionMapConfig::CANCEL_CELL);
            assert_eq!(cursor.section(Layer::Surface), SectionId(0x0C));
            assert_eq!(cursor.section(Layer::Dungeon), SectionId::NONE);
        });
    }

    #[test]
    fn input_prefers_buttons_over_dpad() {
        with_env(|env| {
            let controls = CursorControls {
                permissions: Permissions::SWITCH_BUTTON,
                snap: SnapTargets {
                    player: Some(Position::ORIGIN),
                    switch_button: true,
                },
                select_cancels: false,
            };
            let mut cursor = Cursor::new(Position::new(4, 4), env, Region::Rijon);
            let frame = InputFrame {
                pressed: Buttons::B,
                held: Buttons::B | Buttons::RIGHT,
                repeated: Buttons::B,
            };
            assert_eq!(cursor.handle_input(&frame, controls, env, Region::Rijon), CursorEvent::Cancel);
            assert!(!cursor.is_moving());

            let select = InputFrame::press(Buttons::SELECT);
            assert_eq!(cursor.handle_input(&select, controls, env, Region::Rijon), CursorEvent::None);

            let start = InputFrame::press(Buttons::START);
            assert_eq!(cursor.handle_input(&start, controls, env, Region::Rijon), CursorEvent::MoveEnd);
            assert_eq!(cursor.position(), RegionMapConfig::SWITCH_CELL);
        });
    }

    #[test]
    fn mid_step_input_only_advances_the_step() {
        with_env(|env| {
            let controls = CursorControls {
                permissions: Permissions::empty(),
                snap: SnapTargets {
                    player: None,
                    switch_button: false,
                },
                select_cancels: true,
            };
            let mut cursor = Cursor::new(Position::new(4, 4), env, Region::Rijon);
            let right = InputFrame::hold(Buttons::RIGHT);
            assert_eq!(cursor.handle_input(&right, controls, env, Region::Rijon), CursorEvent::MoveStart);
            let b = InputFrame::press(Buttons::B);
            assert_eq!(cursor.handle_input(&b, controls, env, Region::Rijon), CursorEvent::MoveContinue);
        });
    }
}
