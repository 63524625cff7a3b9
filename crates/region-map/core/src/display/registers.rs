use bitflags::bitflags;

use crate::config::RegionMapConfig;

bitflags! {
    /// Layers taking part in a blend as first or second target.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct BlendTargets: u8 {
        const BG0      = 1 << 0;
        const BG1      = 1 << 1;
        const BG2      = 1 << 2;
        const BG3      = 1 << 3;
        const OBJ      = 1 << 4;
        const BACKDROP = 1 << 5;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendEffect {
    #[default]
    None,
    Alpha,
    Lighten,
    Darken,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlendMode {
    pub first: BlendTargets,
    pub second: BlendTargets,
    pub effect: BlendEffect,
}

impl BlendMode {
    pub const OFF: Self = Self {
        first: BlendTargets::empty(),
        second: BlendTargets::empty(),
        effect: BlendEffect::None,
    };

    pub const fn new(first: BlendTargets, second: BlendTargets, effect: BlendEffect) -> Self {
        Self {
            first,
            second,
            effect,
        }
    }
}

/// Screen rectangle in pixels, right/bottom exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WindowRect {
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
}

impl WindowRect {
    pub const fn new(left: i16, top: i16, right: i16, bottom: i16) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn width(&self) -> i16 {
        self.right - self.left
    }

    pub const fn height(&self) -> i16 {
        self.bottom - self.top
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindowId {
    Highlight,
    Frame,
}

impl WindowId {
    pub const fn index(self) -> usize {
        match self {
            WindowId::Highlight => 0,
            WindowId::Frame => 1,
        }
    }
}

/// Snapshot of the blend and window state an overlay borrows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlendRegisters {
    pub mode: BlendMode,
    pub alpha: (u8, u8),
    pub darkness: u8,
    pub windows: [Option<WindowRect>; 2],
}

/// Indexed save slots for [`BlendRegisters`], one per nesting level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterSlots {
    slots: [Option<BlendRegisters>; RegionMapConfig::REGISTER_SAVE_SLOTS],
}

impl RegisterSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `registers` in `slot`; returns `false` if the slot is taken or out of range.
    pub fn save(&mut self, slot: usize, registers: BlendRegisters) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) if entry.is_none() => {
                *entry = Some(registers);
                true
            }
            _ => false,
        }
    }

    /// Takes the snapshot out of `slot`, freeing it.
    pub fn restore(&mut self, slot: usize) -> Option<BlendRegisters> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn is_occupied(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(Option::is_some)
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_slots_refuse_a_second_save() {
        let mut slots = RegisterSlots::new();
        let first = BlendRegisters {
            darkness: 3,
            ..Default::default()
        };
        assert!(slots.save(0, first));
        assert!(!slots.save(0, BlendRegisters::default()));
        assert_eq!(slots.restore(0), Some(first));
    }

    #[test]
    fn restore_frees_the_slot() {
        let mut slots = RegisterSlots::new();
        assert_eq!(slots.restore(1), None);
        assert!(slots.save(1, BlendRegisters::default()));
        assert!(slots.restore(1).is_some());
        assert!(!slots.is_occupied(1));
        assert_eq!(slots.restore(1), None);
    }

    #[test]
    fn out_of_range_slots_are_rejected() {
        let mut slots = RegisterSlots::new();
        assert!(!slots.save(RegionMapConfig::REGISTER_SAVE_SLOTS, BlendRegisters::default()));
    }
}
