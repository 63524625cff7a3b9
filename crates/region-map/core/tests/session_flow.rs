use region_map_core::display::{HelpSlot, HelpText, NameWindow, SoundCue, SpriteSheet, TextColor};
use region_map_core::overlay::{FlavorStep, PreviewStep, SwitchStep};
use region_map_core::session::{MainStep, Task};
use region_map_core::{
    Buttons, Continuation, DisplayDriver, DriverFault, DungeonDescriptor, DungeonOracle, ErrorSeverity,
    FlyDestination, FlyOracle, InputFrame, Layer, MapKind, MapLocation, MapSectionLookup,
    Overlay, OverworldOracle, Phase, Position, PresentationMode, PreviewAssets, Region,
    RegionLayout, RegionMapConfig, RegionMapEnv, RegionMapError, RegionMapSession, SectionId,
    SectionMetadata, SectionTable, SessionError, SessionExit, SessionRequest, SessionStatus,
    VirtualDisplay, VisitLog, WarpRequest,
};

const MAX_TICKS: usize = 1_000;

const SEASHORE: SectionId = SectionId(0x01);
const GRAVEL: SectionId = SectionId(0x02);
const MERSON_CAVE: SectionId = SectionId(0x1F);
const GOLDENROD: SectionId = SectionId(0x36);

struct Dungeons(Vec<DungeonDescriptor>);

impl DungeonOracle for Dungeons {
    fn descriptor(&self, section: SectionId) -> Option<&DungeonDescriptor> {
        self.0.iter().find(|descriptor| descriptor.section == section)
    }

    fn preview(&self, _section: SectionId) -> Option<&PreviewAssets> {
        None
    }
}

struct FlyTable;

impl FlyOracle for FlyTable {
    fn destination(&self, section: SectionId) -> Option<FlyDestination> {
        match section {
            SEASHORE => Some(FlyDestination { map_group: 3, map_num: 0, heal_location: 1 }),
            GRAVEL => Some(FlyDestination { map_group: 3, map_num: 4, heal_location: 0 }),
            _ => None,
        }
    }
}

struct Overworld(MapKind);

impl OverworldOracle for Overworld {
    fn current_map_kind(&self) -> MapKind {
        self.0
    }

    fn current_location(&self) -> MapLocation {
        MapLocation {
            section: SEASHORE,
            width: 20,
            height: 20,
            x: 5,
            y: 5,
            ..MapLocation::default()
        }
    }

    fn escape_warp_location(&self) -> MapLocation {
        self.current_location()
    }

    fn dynamic_warp_location(&self) -> MapLocation {
        self.current_location()
    }
}

struct World {
    lookup: MapSectionLookup,
    dungeons: Dungeons,
    overworld: Overworld,
    visits: VisitLog,
}

impl World {
    fn new(kind: MapKind) -> Self {
        let sections = SectionTable::new([
            (
                SEASHORE,
                SectionMetadata::new("Seashore City").with_geometry(Position::new(4, 4), Default::default()),
            ),
            (GRAVEL, SectionMetadata::new("Gravel Town").with_geometry(Position::new(4, 6), Default::default())),
            (MERSON_CAVE, SectionMetadata::new("Merson Cave").with_geometry(Position::new(5, 4), Default::default())),
            (GOLDENROD, SectionMetadata::new("Goldenrod City").with_geometry(Position::new(10, 6), Default::default())),
        ])
        .unwrap();

        let mut rijon = RegionLayout::empty();
        rijon.set(Layer::Surface, Position::new(4, 4), SEASHORE).unwrap();
        rijon.set(Layer::Surface, Position::new(4, 6), GRAVEL).unwrap();
        rijon.set(Layer::Dungeon, Position::new(5, 4), MERSON_CAVE).unwrap();
        let mut johto = RegionLayout::empty();
        johto.set(Layer::Surface, Position::new(10, 6), GOLDENROD).unwrap();
        let lookup = MapSectionLookup::new(sections, [(Region::Rijon, rijon), (Region::Johto, johto)]).unwrap();

        let mut visits = VisitLog::new();
        visits
            .visit(Layer::Surface, SEASHORE)
            .visit(Layer::Surface, GRAVEL)
            .visit(Layer::Surface, GOLDENROD)
            .visit(Layer::Dungeon, MERSON_CAVE);

        Self {
            lookup,
            dungeons: Dungeons(vec![DungeonDescriptor {
                section: MERSON_CAVE,
                name: "Merson Cave".to_string(),
                description: "A cave beneath the city.".to_string(),
            }]),
            overworld: Overworld(kind),
            visits,
        }
    }

    fn env(&self) -> RegionMapEnv<'_> {
        RegionMapEnv::new(&self.lookup, &self.dungeons, &FlyTable, &self.overworld, &self.visits)
    }

    fn open(&self, request: SessionRequest) -> RegionMapSession {
        RegionMapSession::open(request, RegionMapConfig::default(), &self.env()).unwrap()
    }
}

fn tick(session: &mut RegionMapSession, world: &World, display: &mut VirtualDisplay, input: InputFrame) -> SessionStatus {
    let status = session.tick(&input, &world.env(), display).unwrap();
    display.end_frame();
    status
}

fn idle_until(
    session: &mut RegionMapSession,
    world: &World,
    display: &mut VirtualDisplay,
    done: impl Fn(&RegionMapSession) -> bool,
) {
    for _ in 0..MAX_TICKS {
        if done(session) {
            return;
        }
        tick(session, world, display, InputFrame::IDLE);
    }
    panic!("condition not reached, session stuck in {:?}", session.phase());
}

fn awaiting_input(session: &RegionMapSession) -> bool {
    session.phase() == Phase::MainLoop(MainStep::Input) && session.active_task() == Some(Task::Main)
}

fn run_to_exit(session: &mut RegionMapSession, world: &World, display: &mut VirtualDisplay) -> SessionExit {
    for _ in 0..MAX_TICKS {
        if let SessionStatus::Finished(exit) = tick(session, world, display, InputFrame::IDLE) {
            return exit;
        }
    }
    panic!("session never finished, stuck in {:?}", session.phase());
}

fn step_cursor(session: &mut RegionMapSession, world: &World, display: &mut VirtualDisplay, direction: Buttons) {
    tick(session, world, display, InputFrame::press(direction));
    idle_until(session, world, display, |session| !session.scene().cursor().is_moving());
}

fn switch_menu_step(session: &RegionMapSession) -> Option<SwitchStep> {
    match session.overlay() {
        Some(Overlay::SwitchMenu(menu)) => Some(menu.step()),
        _ => None,
    }
}

fn open_switch_menu(session: &mut RegionMapSession, world: &World, display: &mut VirtualDisplay) {
    if !session.scene().cursor().is_on_switch() {
        tick(session, world, display, InputFrame::press(Buttons::START));
    }
    assert!(session.scene().cursor().is_on_switch());
    tick(session, world, display, InputFrame::press(Buttons::A));
    idle_until(session, world, display, |session| switch_menu_step(session) == Some(SwitchStep::Input));
}

#[test]
fn normal_map_opens_with_edges_and_closes_on_b() {
    let world = World::new(MapKind::Town);
    let mut display = VirtualDisplay::new();
    let mut session = world.open(SessionRequest::new(PresentationMode::Normal));

    idle_until(&mut session, &world, &mut display, awaiting_input);

    assert_eq!(session.scene().active_region(), Region::Rijon);
    assert_eq!(session.scene().cursor().position(), Position::new(4, 4));
    assert!(session.scene().marker().is_visible());
    assert_eq!(display.visible_sprites(SpriteSheet::Cursor).count(), 1);
    assert_eq!(display.visible_sprites(SpriteSheet::MapEdge(0)).count(), 0);
    let (name, color) = display.name(NameWindow::Map).unwrap();
    assert_eq!((name.trim_end(), color), ("Seashore City", TextColor::White));
    assert!(display.sounds().contains(&SoundCue::MapOpen));
    assert!(display.sounds().contains(&SoundCue::MapEdgeSlide));
    assert!(!session.scene().register_slots().is_occupied(0));
    display.take_sounds();

    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::B));
    assert_eq!(session.phase(), Phase::Closing);

    let exit = run_to_exit(&mut session, &world, &mut display);
    assert_eq!(exit, SessionExit::new(Continuation::ReturnToField));
    assert!(display.sounds().contains(&SoundCue::MapClose));
    assert_eq!(display.sprite_count(), 0);
    assert!(display.is_faded_out());
    assert!(!display.frame_callbacks());
}

#[test]
fn wall_map_closes_without_the_edge_animation() {
    let world = World::new(MapKind::Town);
    let mut display = VirtualDisplay::new();
    let mut session = world.open(SessionRequest::new(PresentationMode::Wall));

    idle_until(&mut session, &world, &mut display, awaiting_input);
    assert!(session.edge_anim().is_none());

    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::SELECT));
    assert_eq!(session.phase(), Phase::FadeOut);

    let mut phases = Vec::new();
    let exit = loop {
        match tick(&mut session, &world, &mut display, InputFrame::IDLE) {
            SessionStatus::Finished(exit) => break exit,
            SessionStatus::Running => phases.push(session.phase()),
        }
        assert!(phases.len() < MAX_TICKS);
    };
    assert!(!phases.contains(&Phase::Closing));
    assert_eq!(exit.continuation, Continuation::ReturnToField);
    assert!(!display.sounds().contains(&SoundCue::MapOpen));
    assert!(!display.sounds().contains(&SoundCue::MapClose));
}

#[test]
fn select_is_ignored_when_opened_from_the_bag() {
    let world = World::new(MapKind::Town);
    let mut display = VirtualDisplay::new();
    let request = SessionRequest::new(PresentationMode::Wall).with_exit(Continuation::ReturnToBag);
    let mut session = world.open(request);

    idle_until(&mut session, &world, &mut display, awaiting_input);
    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::SELECT));
    assert!(awaiting_input(&session));

    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::B));
    let exit = run_to_exit(&mut session, &world, &mut display);
    assert_eq!(exit.continuation, Continuation::ReturnToBag);
}

#[test]
fn switch_menu_confirm_commits_and_cancel_restores() {
    let world = World::new(MapKind::Town);
    let mut display = VirtualDisplay::new();
    let mut session = world.open(SessionRequest::new(PresentationMode::Normal));
    idle_until(&mut session, &world, &mut display, awaiting_input);

    open_switch_menu(&mut session, &world, &mut display);
    assert!(session.scene().register_slots().is_occupied(0));
    assert_eq!(display.visible_sprites(SpriteSheet::Cursor).count(), 0);

    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::DOWN));
    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::A));
    idle_until(&mut session, &world, &mut display, awaiting_input);

    assert_eq!(session.scene().active_region(), Region::Johto);
    assert!(!session.scene().marker().is_visible());
    assert!(session.overlay().is_none());
    assert!(!session.scene().register_slots().is_occupied(0));
    assert_eq!(display.visible_sprites(SpriteSheet::Cursor).count(), 1);
    assert_eq!(display.help(HelpSlot::Right), HelpText::AButtonSwitch);

    open_switch_menu(&mut session, &world, &mut display);
    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::DOWN));
    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::B));
    idle_until(&mut session, &world, &mut display, awaiting_input);

    assert_eq!(session.scene().active_region(), Region::Johto);
    assert!(session.scene().icons().dungeon_icons().iter().all(|icon| !icon.is_visible()));
}

#[test]
fn switch_menu_cancel_after_wrapping_restores_the_map() {
    let world = World::new(MapKind::Town);
    let mut display = VirtualDisplay::new();
    let mut session = world.open(SessionRequest::new(PresentationMode::Normal));
    idle_until(&mut session, &world, &mut display, awaiting_input);

    open_switch_menu(&mut session, &world, &mut display);
    for press in [Buttons::UP, Buttons::UP, Buttons::DOWN, Buttons::UP, Buttons::UP, Buttons::DOWN] {
        tick(&mut session, &world, &mut display, InputFrame::press(press));
    }
    match session.overlay() {
        Some(Overlay::SwitchMenu(menu)) => assert_eq!(menu.selection(), Region::Johto),
        other => panic!("switch menu closed early: {other:?}"),
    }
    assert!(!session.scene().marker().is_visible());

    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::B));
    idle_until(&mut session, &world, &mut display, awaiting_input);

    assert_eq!(session.scene().active_region(), Region::Rijon);
    assert!(session.scene().marker().is_visible());
    assert!(!session.scene().register_slots().is_occupied(0));
    assert_eq!(display.help(HelpSlot::Right), HelpText::AButtonSwitch);
}

#[test]
fn visited_dungeon_opens_the_preview() {
    let world = World::new(MapKind::Town);
    let mut display = VirtualDisplay::new();
    let mut session = world.open(SessionRequest::new(PresentationMode::Normal));
    idle_until(&mut session, &world, &mut display, awaiting_input);

    step_cursor(&mut session, &world, &mut display, Buttons::RIGHT);
    assert_eq!(session.scene().cursor().section(Layer::Dungeon), MERSON_CAVE);
    assert_eq!(display.help(HelpSlot::Right), HelpText::AButtonGuide);
    assert_eq!(display.name(NameWindow::Dungeon).map(|(_, color)| color), Some(TextColor::Green));

    let registers = display.registers();
    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::A));
    idle_until(&mut session, &world, &mut display, |session| {
        matches!(
            session.overlay(),
            Some(Overlay::DungeonPreview(preview)) if preview.step() == PreviewStep::Flavor(FlavorStep::AwaitInput)
        )
    });
    assert_eq!(display.preview_text(), Some(("Merson Cave", "A cave beneath the city.")));

    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::B));
    assert_eq!(display.preview_text(), None);
    idle_until(&mut session, &world, &mut display, awaiting_input);

    assert_eq!(display.registers(), registers);
    assert_eq!(display.help(HelpSlot::Right), HelpText::AButtonGuide);
    assert!(display.name(NameWindow::Dungeon).is_some());
}

#[test]
fn flying_to_a_town_with_a_heal_location() {
    let world = World::new(MapKind::Route);
    let mut display = VirtualDisplay::new();
    let mut session = world.open(SessionRequest::new(PresentationMode::Fly));
    idle_until(&mut session, &world, &mut display, awaiting_input);

    assert_eq!(display.help(HelpSlot::Right), HelpText::AButtonOk);
    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::A));
    assert!(display.sounds().contains(&SoundCue::FlyConfirm));
    assert_eq!(session.phase(), Phase::FadeOut);

    let exit = run_to_exit(&mut session, &world, &mut display);
    assert_eq!(exit.continuation, Continuation::ReturnToField);
    assert_eq!(exit.warp, Some(WarpRequest::HealLocation(1)));
}

#[test]
fn flying_to_a_town_without_a_heal_location_warps_to_the_map() {
    let world = World::new(MapKind::Route);
    let mut display = VirtualDisplay::new();
    let mut session = world.open(SessionRequest::new(PresentationMode::Fly));
    idle_until(&mut session, &world, &mut display, awaiting_input);

    step_cursor(&mut session, &world, &mut display, Buttons::DOWN);
    step_cursor(&mut session, &world, &mut display, Buttons::DOWN);
    assert_eq!(session.scene().cursor().section(Layer::Surface), GRAVEL);
    assert!(display.sounds().contains(&SoundCue::FlyHover));
    assert_eq!(display.help(HelpSlot::Right), HelpText::AButtonOk);

    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::A));
    let exit = run_to_exit(&mut session, &world, &mut display);
    assert_eq!(exit.warp, Some(WarpRequest::Map { group: 3, num: 4, warp: -1 }));
}

#[test]
fn fly_is_blocked_indoors() {
    let world = World::new(MapKind::Indoor);
    let mut display = VirtualDisplay::new();
    let mut session = world.open(SessionRequest::new(PresentationMode::Fly));
    idle_until(&mut session, &world, &mut display, awaiting_input);

    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::A));
    assert!(!display.sounds().contains(&SoundCue::FlyConfirm));
    assert_eq!(session.fly().and_then(|fly| fly.selected_destination()), None);

    let exit = run_to_exit(&mut session, &world, &mut display);
    assert_eq!(exit, SessionExit::new(Continuation::ReturnToPartyMenu));
}

#[test]
fn cancelling_fly_returns_to_the_party_menu() {
    let world = World::new(MapKind::Route);
    let mut display = VirtualDisplay::new();
    let mut session = world.open(SessionRequest::new(PresentationMode::Fly));
    idle_until(&mut session, &world, &mut display, awaiting_input);

    tick(&mut session, &world, &mut display, InputFrame::press(Buttons::B));
    assert_eq!(session.phase(), Phase::FadeOut);
    let exit = run_to_exit(&mut session, &world, &mut display);
    assert_eq!(exit, SessionExit::new(Continuation::ReturnToPartyMenu));
}

#[test]
fn allocation_failure_reports_the_fallback() {
    let world = World::new(MapKind::Town);
    let request = SessionRequest::new(PresentationMode::Normal).with_fallback(Continuation::ReturnToBag);
    let config = RegionMapConfig::default().with_heap_budget(16);

    let error = RegionMapSession::open(request, config, &world.env()).unwrap_err();
    assert!(matches!(error, SessionError::AllocationFailed { budget: 16, .. }));
    assert_eq!(error.fallback(), Continuation::ReturnToBag);
    assert_eq!(error.severity(), ErrorSeverity::Fatal);
    assert_eq!(error.error_code(), "SESSION_ALLOCATION_FAILED");
}

#[test]
fn driver_fault_aborts_and_releases_sprites() {
    let world = World::new(MapKind::Town);
    let mut display = VirtualDisplay::new();
    let mut session = world.open(SessionRequest::new(PresentationMode::Normal));
    idle_until(&mut session, &world, &mut display, awaiting_input);
    assert!(display.sprite_count() > 0);

    display.inject_fault(DriverFault::DeviceLost);
    let error = session.tick(&InputFrame::IDLE, &world.env(), &mut display).unwrap_err();

    assert_eq!(error, SessionError::Driver(DriverFault::DeviceLost));
    assert_eq!(error.fallback(), Continuation::ReturnToField);
    assert!(session.is_finished());
    assert_eq!(display.sprite_count(), 0);
}
