//! Fly destination and dungeon icons for every region.

use arrayvec::ArrayVec;

use crate::config::RegionMapConfig;
use crate::display::{DisplayDriver, SpriteHandle, SpriteSheet};
use crate::env::RegionMapEnv;
use crate::session::Permissions;
use crate::types::{Layer, Position, Region, RegionFilter, ScreenPos, SectionId, SectionType};

type IconList = ArrayVec<RegionIcon, { RegionMapConfig::MAX_ICONS_PER_KIND }>;

/// Animation used by dungeon icons whose dungeon has not been visited.
const UNVISITED_ANIM: u8 = 1;
/// Pixel nudge for dungeon icons sharing a cell with a town.
const TOWN_OFFSET_PX: i16 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionIcon {
    pub region: Region,
    pub position: Position,
    pub section: SectionId,
    pub visited: bool,
    /// Shifted towards the bottom right to leave room for a town marker.
    pub offset: bool,
    visible: bool,
    sprite: Option<SpriteHandle>,
}

impl RegionIcon {
    fn new(region: Region, position: Position, section: SectionId, visited: bool, offset: bool) -> Self {
        Self {
            region,
            position,
            section,
            visited,
            offset,
            visible: false,
            sprite: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn screen_position(&self) -> ScreenPos {
        let nudge = if self.offset { TOWN_OFFSET_PX } else { 0 };
        let cell = |c: i32| (c as i16) * RegionMapConfig::CELL_PX + RegionMapConfig::CURSOR_ORIGIN_PX + nudge;
        ScreenPos::new(cell(self.position.x), cell(self.position.y))
    }

    fn apply(&mut self, visible: bool, driver: &mut dyn DisplayDriver) {
        self.visible = visible;
        if let Some(sprite) = self.sprite {
            driver.set_sprite_visible(sprite, visible);
        }
    }
}

/// Icon sets built once per session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionIcons {
    fly: IconList,
    dungeon: IconList,
    skipped: usize,
}

impl RegionIcons {
    /// Scans every region and cell.
    ///
    /// Every occupied dungeon cell gets a dungeon icon; a surface cell gets a
    /// fly icon only when it is visited and `permissions` allow fly
    /// destinations. Icons past the per-kind capacity are skipped.
    pub fn build(env: &RegionMapEnv<'_>, permissions: Permissions) -> Self {
        let mut icons = Self::default();
        let fly_enabled = permissions.contains(Permissions::FLY_DESTINATIONS);

        for region in Region::ALL {
            for y in 0..RegionMapConfig::MAP_HEIGHT {
                for x in 0..RegionMapConfig::MAP_WIDTH {
                    let position = Position::new(x, y);
                    let surface = env.section_at(region, Layer::Surface, position);
                    let surface_type = env.section_type(Layer::Surface, surface);

                    let dungeon = env.section_at(region, Layer::Dungeon, position);
                    if !dungeon.is_none() {
                        let visited = env.section_type(Layer::Dungeon, dungeon) == SectionType::Visited;
                        let icon = RegionIcon::new(region, position, dungeon, visited, surface_type.is_town());
                        icons.skipped += usize::from(icons.dungeon.try_push(icon).is_err());
                    }

                    if fly_enabled && surface_type == SectionType::Visited {
                        let icon = RegionIcon::new(region, position, surface, true, false);
                        icons.skipped += usize::from(icons.fly.try_push(icon).is_err());
                    }
                }
            }
        }

        if icons.skipped > 0 {
            tracing::warn!(skipped = icons.skipped, "region icon capacity exceeded");
        }
        tracing::debug!(fly = icons.fly.len(), dungeon = icons.dungeon.len(), "region icons built");
        icons
    }

    pub fn fly_icons(&self) -> &[RegionIcon] {
        &self.fly
    }

    pub fn dungeon_icons(&self) -> &[RegionIcon] {
        &self.dungeon
    }

    /// Icons dropped because a kind was full.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Creates hidden sprites for every dungeon icon.
    pub fn spawn_dungeon_icons(&mut self, driver: &mut dyn DisplayDriver) {
        for icon in self.dungeon.iter_mut() {
            let sprite = driver.create_sprite(SpriteSheet::DungeonIcon, icon.screen_position(), 3);
            driver.set_sprite_visible(sprite, false);
            if !icon.visited {
                driver.set_sprite_anim(sprite, UNVISITED_ANIM);
            }
            icon.sprite = Some(sprite);
        }
    }

    /// Creates hidden sprites for every fly icon.
    pub fn spawn_fly_icons(&mut self, driver: &mut dyn DisplayDriver) {
        for icon in self.fly.iter_mut() {
            let sprite = driver.create_sprite(SpriteSheet::FlyIcon, icon.screen_position(), 1);
            driver.set_sprite_visible(sprite, false);
            icon.sprite = Some(sprite);
        }
    }

    pub fn set_fly_visibility(&mut self, filter: RegionFilter, visible: bool, driver: &mut dyn DisplayDriver) {
        for icon in self.fly.iter_mut().filter(|icon| filter.matches(icon.region)) {
            icon.apply(visible, driver);
        }
    }

    pub fn set_dungeon_visibility(&mut self, filter: RegionFilter, visible: bool, driver: &mut dyn DisplayDriver) {
        for icon in self.dungeon.iter_mut().filter(|icon| filter.matches(icon.region)) {
            icon.apply(visible, driver);
        }
    }

    /// Sets both kinds for the regions matching `filter`.
    pub fn set_visibility(&mut self, filter: RegionFilter, visible: bool, driver: &mut dyn DisplayDriver) {
        self.set_fly_visibility(filter, visible, driver);
        self.set_dungeon_visibility(filter, visible, driver);
    }

    /// Hides every icon, then shows the icons of `region`.
    pub fn show_only(&mut self, region: Region, driver: &mut dyn DisplayDriver) {
        self.set_visibility(RegionFilter::All, false, driver);
        self.set_visibility(RegionFilter::Only(region), true, driver);
    }

    /// Toggles one fly icon if it belongs to `region`.
    ///
    /// Returns whether the icon was changed.
    #[cfg(test)]
    pub(crate) fn set_fly_icon_visibility(
        &mut self,
        index: usize,
        region: Region,
        visible: bool,
        driver: &mut dyn DisplayDriver,
    ) -> bool {
        match self.fly.get_mut(index) {
            Some(icon) if icon.region == region => {
                icon.apply(visible, driver);
                true
            }
            _ => false,
        }
    }

    /// Toggles one dungeon icon if it belongs to a region other than `region`.
    ///
    /// This is the inverse of [`RegionIcons::set_fly_icon_visibility`]'s
    /// filter; both are kept as the callers expect them.
    #[cfg(test)]
    pub(crate) fn set_dungeon_icon_visibility(
        &mut self,
        index: usize,
        region: Region,
        visible: bool,
        driver: &mut dyn DisplayDriver,
    ) -> bool {
        match self.dungeon.get_mut(index) {
            Some(icon) if icon.region != region => {
                icon.apply(visible, driver);
                true
            }
            _ => false,
        }
    }

    pub fn despawn(&mut self, driver: &mut dyn DisplayDriver) {
        for icon in self.fly.iter_mut().chain(self.dungeon.iter_mut()) {
            if let Some(sprite) = icon.sprite.take() {
                driver.destroy_sprite(sprite);
            }
            icon.visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::VirtualDisplay;
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

    const TOWN_A: SectionId = SectionId(0x01);
    const TOWN_B: SectionId = SectionId(0x36);
    const TOWN_C: SectionId = SectionId(0x41);
    const CAVE_A: SectionId = SectionId(0x1F);
    const CAVE_B: SectionId = SectionId(0x3E);
    const CAVE_C: SectionId = SectionId(0x46);

    fn lookup() -> MapSectionLookup {
        let sections = SectionTable::new(
            [
                (TOWN_A, "Seashore City"),
                (TOWN_B, "Goldenrod City"),
                (TOWN_C, "Wyler Town"),
                (CAVE_A, "Merson Cave"),
                (CAVE_B, "Union Cave"),
                (CAVE_C, "Time Relic Ruins"),
            ]
            .map(|(id, name)| (id, SectionMetadata::new(name))),
        )
        .unwrap();

        let layouts = [
            (Region::Rijon, TOWN_A, CAVE_A, Position::new(2, 2)),
            (Region::Johto, TOWN_B, CAVE_B, Position::new(5, 5)),
            (Region::SouthRijon, TOWN_C, CAVE_C, Position::new(8, 8)),
        ]
        .map(|(region, town, cave, at)| {
            let mut layout = RegionLayout::empty();
            layout.set(Layer::Surface, at, town).unwrap();
            layout.set(Layer::Dungeon, at, cave).unwrap();
            layout.set(Layer::Dungeon, Position::new(at.x + 1, at.y), cave).unwrap();
            (region, layout)
        });

        MapSectionLookup::new(sections, layouts).unwrap()
    }

    fn built(permissions: Permissions, driver: &mut VirtualDisplay) -> RegionIcons {
        let lookup = lookup();
        let mut visits = VisitLog::new();
        visits
            .visit(Layer::Surface, TOWN_A)
            .visit(Layer::Surface, TOWN_B)
            .visit(Layer::Dungeon, CAVE_B);
        let env = RegionMapEnv::new(&lookup, &NoData, &NoData, &NoData, &visits);
        let mut icons = RegionIcons::build(&env, permissions);
        icons.spawn_dungeon_icons(driver);
        icons.spawn_fly_icons(driver);
        icons
    }

    #[test]
    fn build_places_dungeon_and_fly_icons() {
        let mut driver = VirtualDisplay::new();
        let icons = built(Permissions::FLY_DESTINATIONS, &mut driver);

        assert_eq!(icons.dungeon_icons().len(), 6);
        assert_eq!(icons.fly_icons().len(), 2);
        assert!(icons.fly_icons().iter().all(|icon| icon.visited));

        let union_cave: Vec<_> = icons
            .dungeon_icons()
            .iter()
            .filter(|icon| icon.section == CAVE_B)
            .collect();
        assert!(union_cave.iter().all(|icon| icon.visited));
        // Only the cell shared with Goldenrod City is nudged.
        assert_eq!(union_cave.iter().filter(|icon| icon.offset).count(), 1);
        assert!(icons.dungeon_icons().iter().all(|icon| !icon.is_visible()));
    }

    #[test]
    fn fly_icons_require_permission() {
        let mut driver = VirtualDisplay::new();
        let icons = built(Permissions::MAP_PREVIEW, &mut driver);
        assert!(icons.fly_icons().is_empty());
        assert_eq!(icons.dungeon_icons().len(), 6);
    }

    #[test]
    fn unvisited_dungeons_use_the_alternate_animation() {
        let mut driver = VirtualDisplay::new();
        built(Permissions::empty(), &mut driver);
        let anims: Vec<u8> = driver
            .sprites()
            .filter(|(_, state)| state.sheet == SpriteSheet::DungeonIcon)
            .map(|(_, state)| state.anim)
            .collect();
        assert_eq!(anims.iter().filter(|anim| **anim == UNVISITED_ANIM).count(), 4);
    }

    #[test]
    fn visibility_partition_by_region() {
        let mut driver = VirtualDisplay::new();
        let mut icons = built(Permissions::FLY_DESTINATIONS, &mut driver);

        for target in Region::ALL {
            // Arbitrary prior state: Rijon shown, others hidden.
            icons.set_visibility(RegionFilter::All, false, &mut driver);
            icons.set_visibility(RegionFilter::Only(Region::Rijon), true, &mut driver);
            let before: Vec<bool> = icons.dungeon_icons().iter().map(RegionIcon::is_visible).collect();

            icons.set_dungeon_visibility(RegionFilter::Only(target), true, &mut driver);
            for (icon, was) in icons.dungeon_icons().iter().zip(before) {
                if icon.region == target {
                    assert!(icon.is_visible());
                } else {
                    assert_eq!(icon.is_visible(), was);
                }
            }
        }

        icons.set_visibility(RegionFilter::All, true, &mut driver);
        assert!(icons.dungeon_icons().iter().chain(icons.fly_icons()).all(RegionIcon::is_visible));
        assert_eq!(driver.visible_sprites(SpriteSheet::FlyIcon).count(), 2);
    }

    #[test]
    fn show_only_leaves_one_region_visible() {
        let mut driver = VirtualDisplay::new();
        let mut icons = built(Permissions::FLY_DESTINATIONS, &mut driver);
        icons.show_only(Region::Johto, &mut driver);
        for icon in icons.dungeon_icons().iter().chain(icons.fly_icons()) {
            assert_eq!(icon.is_visible(), icon.region == Region::Johto);
        }
    }

    #[test]
    fn single_icon_filters_are_inverted_between_kinds() {
        let mut driver = VirtualDisplay::new();
        let mut icons = built(Permissions::FLY_DESTINATIONS, &mut driver);

        for index in 0..icons.fly_icons().len() {
            let owner = icons.fly_icons()[index].region;
            for region in Region::ALL {
                let changed = icons.set_fly_icon_visibility(index, region, true, &mut driver);
                assert_eq!(changed, region == owner);
            }
        }

        for index in 0..icons.dungeon_icons().len() {
            let owner = icons.dungeon_icons()[index].region;
            for region in Region::ALL {
                let changed = icons.set_dungeon_icon_visibility(index, region, true, &mut driver);
                assert_eq!(changed, region != owner);
            }
        }
    }

    #[test]
    fn single_icon_out_of_range_is_ignored() {
        let mut driver = VirtualDisplay::new();
        let mut icons = built(Permissions::FLY_DESTINATIONS, &mut driver);
        assert!(!icons.set_fly_icon_visibility(99, Region::Rijon, true, &mut driver));
        assert!(!icons.set_dungeon_icon_visibility(99, Region::Rijon, true, &mut driver));
    }

    #[test]
    fn capacity_overflow_skips_extra_icons() {
        let sections = SectionTable::new([(CAVE_A, SectionMetadata::new("Merson Cave"))]).unwrap();
        let mut layout = RegionLayout::empty();
        for x in 0..RegionMapConfig::MAP_WIDTH {
            for y in 0..2 {
                layout.set(Layer::Dungeon, Position::new(x, y), CAVE_A).unwrap();
            }
        }
        let lookup = MapSectionLookup::new(sections, [(Region::Rijon, layout)]).unwrap();
        let visits = VisitLog::new();
        let env = RegionMapEnv::new(&lookup, &NoData, &NoData, &NoData, &visits);

        let icons = RegionIcons::build(&env, Permissions::empty());
        assert_eq!(icons.dungeon_icons().len(), RegionMapConfig::MAX_ICONS_PER_KIND);
        assert_eq!(icons.skipped(), 44 - RegionMapConfig::MAX_ICONS_PER_KIND);
    }

    #[test]
    fn despawn_destroys_sprites() {
        let mut driver = VirtualDisplay::new();
        let mut icons = built(Permissions::FLY_DESTINATIONS, &mut driver);
        assert_eq!(driver.sprite_count(), 8);
        icons.despawn(&mut driver);
        assert_eq!(driver.sprite_count(), 0);
    }
}
