//! Button vocabulary and per-tick input snapshot.
use bitflags::bitflags;

use crate::types::Direction;

bitflags! {
    /// Console buttons, in hardware bit order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u16 {
        const A      = 1 << 0;
        const B      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const RIGHT  = 1 << 4;
        const LEFT   = 1 << 5;
        const UP     = 1 << 6;
        const DOWN   = 1 << 7;
        const R      = 1 << 8;
        const L      = 1 << 9;

        const DPAD = Self::RIGHT.bits() | Self::LEFT.bits() | Self::UP.bits() | Self::DOWN.bits();
    }
}

impl Buttons {
    pub const fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Up => Buttons::UP,
            Direction::Down => Buttons::DOWN,
            Direction::Left => Buttons::LEFT,
            Direction::Right => Buttons::RIGHT,
        }
    }
}

/// Input state for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Buttons that went down this tick.
    pub pressed: Buttons,
    /// Buttons currently down.
    pub held: Buttons,
    /// Newly pressed plus auto-repeat pulses while held.
    pub repeated: Buttons,
}

impl InputFrame {
    pub const IDLE: Self = Self {
        pressed: Buttons::empty(),
        held: Buttons::empty(),
        repeated: Buttons::empty(),
    };

    /// A tick on which `buttons` went down.
    pub const fn press(buttons: Buttons) -> Self {
        Self {
            pressed: buttons,
            held: buttons,
            repeated: buttons,
        }
    }

    /// A tick on which `buttons` are held without a new press.
    pub const fn hold(buttons: Buttons) -> Self {
        Self {
            pressed: Buttons::empty(),
            held: buttons,
            repeated: Buttons::empty(),
        }
    }

    pub fn new_press(&self, buttons: Buttons) -> bool {
        self.pressed.intersects(buttons)
    }

    pub fn is_held(&self, buttons: Buttons) -> bool {
        self.held.intersects(buttons)
    }

    pub fn repeat(&self, buttons: Buttons) -> bool {
        self.repeated.intersects(buttons)
    }
}
