//! Pointer and keyboard input mapped to button gestures.

use macroquad::prelude::*;

use crate::widget::Rect2;

/// A gesture on the roll button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Pointer went down on the button.
    PressIn,
    /// Pointer came up after a press.
    PressOut,
    /// Pointer came up over the button: the tap completed.
    Press,
    /// Keyboard shortcut for a whole tap.
    Tap,
    /// Leave the app.
    Quit,
}

/// Tracks whether the pointer is holding the button.
#[derive(Debug, Default)]
pub struct PointerTracker {
    holding: bool,
}

impl PointerTracker {
    /// Create a tracker with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn this frame's pointer state into gestures.
    ///
    /// Pure so the gesture rules can be tested without a window.
    pub fn track(&mut self, pressed: bool, released: bool, over_button: bool) -> Vec<Gesture> {
        let mut gestures = Vec::new();
        if pressed && over_button && !self.holding {
            self.holding = true;
            gestures.push(Gesture::PressIn);
        }
        if released && self.holding {
            self.holding = false;
            gestures.push(Gesture::PressOut);
            if over_button {
                gestures.push(Gesture::Press);
            }
        }
        gestures
    }

    /// Whether the pointer is holding the button.
    pub fn is_holding(&self) -> bool {
        self.holding
    }
}

/// Collect this frame's gestures for a button at `area`.
pub fn poll(tracker: &mut PointerTracker, area: &Rect2) -> Vec<Gesture> {
    let (mx, my) = crate::theme::mouse_canvas_position();
    let mut gestures = tracker.track(
        is_mouse_button_pressed(MouseButton::Left),
        is_mouse_button_released(MouseButton::Left),
        area.contains(mx, my),
    );
    if is_key_pressed(KeyCode::Space) {
        gestures.push(Gesture::Tap);
    }
    if is_key_pressed(KeyCode::Escape) {
        gestures.push(Gesture::Quit);
    }
    gestures
}
