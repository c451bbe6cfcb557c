//! Keyboard buttons with debounce.
//!
//! The A, B, X and Y keys stand in for the four buttons on the board. Each
//! key is debounced on its own: a press closer than [`DEBOUNCE`] to the last
//! accepted press of the same key is ignored.

use std::time::Instant;

use embedded_graphics_simulator::sdl2::Keycode;
use grow_common::Button;

use crate::timing::DEBOUNCE;

/// Board button for a key, if it is one of A/B/X/Y.
pub fn button_for(keycode: Keycode) -> Option<Button> {
    match keycode {
        Keycode::A => Some(Button::A),
        Keycode::B => Some(Button::B),
        Keycode::X => Some(Button::X),
        Keycode::Y => Some(Button::Y),
        _ => None,
    }
}

/// Per-button debounce state with time-based edge acceptance.
pub struct Debouncer {
    last_press: [Option<Instant>; Button::ALL.len()],
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            last_press: [None; Button::ALL.len()],
        }
    }

    /// Returns true when a press of `button` at `now` should be acted on.
    pub fn accept(
        &mut self,
        button: Button,
        now: Instant,
    ) -> bool {
        let slot = &mut self.last_press[button as usize];
        if let Some(last) = *slot
            && now.saturating_duration_since(last) < DEBOUNCE
        {
            return false;
        }
        *slot = Some(now);
        true
    }
}

impl Default for Debouncer {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
