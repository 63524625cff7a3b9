//! Keyboard input for the viewer.
//!
//! Terminals report key presses but not releases, so a pressed button counts
//! as held for a short window afterwards. Auto-repeat from the terminal keeps
//! it held while the key stays down.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use region_map_core::{Buttons, InputFrame, RegionMapConfig};

/// Ticks a button stays held after its last press.
///
/// Shorter than one cursor step, so a single tap never starts a second step.
/// Terminal auto-repeat re-presses the key fast enough to keep it held.
const HOLD_TICKS: u8 = RegionMapConfig::CURSOR_MOVE_TICKS;

/// High-level outcome of processing a keyboard event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Feed a button press to the session.
    Press(Buttons),
    /// No meaningful command was produced.
    None,
}

/// Translates a raw key event into a button press.
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    let buttons = match key.code {
        KeyCode::Up => Buttons::UP,
        KeyCode::Down => Buttons::DOWN,
        KeyCode::Left => Buttons::LEFT,
        KeyCode::Right => Buttons::RIGHT,
        KeyCode::Enter => Buttons::A,
        KeyCode::Esc | KeyCode::Backspace => Buttons::B,
        KeyCode::Tab => Buttons::SELECT,
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'q' => return KeyAction::Quit,
            'w' | 'k' => Buttons::UP,
            's' | 'j' => Buttons::DOWN,
            'a' | 'h' => Buttons::LEFT,
            'd' | 'l' => Buttons::RIGHT,
            'z' => Buttons::A,
            'x' => Buttons::B,
            ' ' => Buttons::START,
            _ => return KeyAction::None,
        },
        _ => return KeyAction::None,
    };
    KeyAction::Press(buttons)
}

/// Builds one [`InputFrame`] per tick from the presses seen since the last one.
#[derive(Debug, Default)]
pub struct ButtonLatch {
    pending: Buttons,
    held_for: [u8; 16],
}

impl ButtonLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, buttons: Buttons) {
        self.pending |= buttons;
    }

    /// Consumes pending presses into the frame for this tick.
    pub fn frame(&mut self) -> InputFrame {
        let pressed = std::mem::take(&mut self.pending);
        let mut held = Buttons::empty();

        for (bit, ticks) in self.held_for.iter_mut().enumerate() {
            let button = Buttons::from_bits_truncate(1 << bit);
            if button.is_empty() {
                continue;
            }
            if pressed.contains(button) {
                *ticks = HOLD_TICKS;
            }
            if *ticks > 0 {
                held |= button;
                *ticks -= 1;
            }
        }

        InputFrame {
            pressed,
            held,
            repeated: pressed,
        }
    }
}
