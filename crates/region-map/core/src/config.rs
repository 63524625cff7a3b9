use crate::types::Position;

/// Region map constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegionMapConfig {
    /// Grants the region switch button to every presentation mode.
    pub force_switch_button: bool,
    /// Bytes available for the session's working buffers.
    pub heap_budget: usize,
    /// Lets Select close the map when it was opened from the field.
    pub select_closes_field_map: bool,
}

impl RegionMapConfig {
    // ===== grid geometry =====
    pub const MAP_WIDTH: i32 = 22;
    pub const MAP_HEIGHT: i32 = 15;
    pub const CANCEL_CELL: Position = Position::new(21, 13);
    pub const SWITCH_CELL: Position = Position::new(21, 11);

    // ===== cursor =====
    pub const CURSOR_MOVE_TICKS: u8 = 4;
    pub const CURSOR_STEP_PX: i16 = 2;
    pub const CELL_PX: i16 = 8;
    pub const CURSOR_ORIGIN_PX: i16 = 36;

    // ===== capacities used as type parameters =====
    pub const MAX_ICONS_PER_KIND: usize = 25;
    pub const REGISTER_SAVE_SLOTS: usize = 3;
    pub const MAX_TASK_DEPTH: usize = 4;
    pub const MAP_EDGE_COUNT: usize = 6;

    // ===== layout buffers (tiles) =====
    pub const LAYOUT_WIDTH: usize = 30;
    pub const LAYOUT_HEIGHT: usize = 20;
    pub const SCROLL_BUFFER_WIDTH: usize = 32;

    // ===== blend levels =====
    pub const SWITCH_MENU_ALPHA_MAX: u8 = 16;
    pub const SWITCH_MENU_ALPHA_STEP: u8 = 2;
    pub const SWITCH_MENU_DIM_LEVEL: u8 = 6;
    pub const PREVIEW_DIM_LEVEL: u8 = 6;
    pub const EDGE_DARK_LEVEL: u8 = 15;
    pub const EDGE_OPEN_LIGHT_LEVEL: u8 = 2;

    // ===== dungeon preview timings =====
    pub const PREVIEW_ZOOM_STEPS: i16 = 8;
    pub const PREVIEW_FLAVOR_DELAY: u8 = 40;
    pub const PREVIEW_TINT_AFTER: u8 = 20;
    pub const PREVIEW_TEXT_AFTER: u8 = 25;

    // ===== map palette =====
    pub const MAP_PALETTE_DARKEN_RANGE: core::ops::Range<usize> = 32..47;
    pub const MAP_PALETTE_DARKEN_PERCENT: u16 = 95;

    // ===== names =====
    pub const DEFAULT_NAME_FILL: usize = 18;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FORCE_SWITCH_BUTTON: bool = true;
    pub const DEFAULT_HEAP_BUDGET: usize = 0x40000;
    pub const DEFAULT_SELECT_CLOSES_FIELD_MAP: bool = true;

    pub fn new() -> Self {
        Self {
            force_switch_button: Self::DEFAULT_FORCE_SWITCH_BUTTON,
            heap_budget: Self::DEFAULT_HEAP_BUDGET,
            select_closes_field_map: Self::DEFAULT_SELECT_CLOSES_FIELD_MAP,
        }
    }

    pub fn with_heap_budget(mut self, heap_budget: usize) -> Self {
        self.heap_budget = heap_budget;
        self
    }

    pub fn with_force_switch_button(mut self, force_switch_button: bool) -> Self {
        self.force_switch_button = force_switch_button;
        self
    }

    /// True when `position` lies inside the map grid.
    pub fn contains(position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < Self::MAP_WIDTH
            && position.y < Self::MAP_HEIGHT
    }
}

impl Default for RegionMapConfig {
    fn default() -> Self {
        Self::new()
    }
}
