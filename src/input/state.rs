//! Per-frame pointer input
//!
//! The editor core never polls devices itself. Each frame the shell builds
//! one `InputSnapshot` and hands it to the session, so every interaction is
//! a function of (previous state, snapshot) and can be replayed in tests.

use macroquad::prelude::{is_mouse_button_down, is_mouse_button_pressed, mouse_position, MouseButton};
use crate::math::Vec2;

/// Primary pointer state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Pointer position in screen coordinates (top-left origin)
    pub pointer_position: Vec2,
    /// Primary button went down this frame
    pub pointer_pressed: bool,
    /// Primary button is currently held
    pub pointer_held: bool,
}

impl InputSnapshot {
    /// Pointer hovering with the button up
    #[cfg(test)]
    pub fn idle(x: f32, y: f32) -> Self {
        Self {
            pointer_position: Vec2::new(x, y),
            pointer_pressed: false,
            pointer_held: false,
        }
    }

    /// Button pressed this frame (and therefore held)
    #[cfg(test)]
    pub fn press(x: f32, y: f32) -> Self {
        Self {
            pointer_position: Vec2::new(x, y),
            pointer_pressed: true,
            pointer_held: true,
        }
    }

    /// Button held since an earlier frame
    #[cfg(test)]
    pub fn hold(x: f32, y: f32) -> Self {
        Self {
            pointer_position: Vec2::new(x, y),
            pointer_pressed: false,
            pointer_held: true,
        }
    }

    /// Poll the mouse through macroquad. Call once per frame.
    pub fn poll() -> Self {
        let (x, y) = mouse_position();
        Self {
            pointer_position: Vec2::new(x, y),
            pointer_pressed: is_mouse_button_pressed(MouseButton::Left),
            pointer_held: is_mouse_button_down(MouseButton::Left),
        }
    }
}
