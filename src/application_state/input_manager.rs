//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Keyboard input state tracking
//! - Mouse motion accumulation
//! - Translation of raw input into per-frame player actions

use std::collections::HashMap;

use winit::{
    event::{KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::engine_state::PlayerAction;

/// Keys the engine reacts to. Anything else is ignored at intake.
const KEY_CODES: [KeyCode; 5] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::Space,
];

/// Manages the state of all input devices and processes input events.
///
/// Keyboard keys are tracked as held/released; mouse motion deltas are
/// accumulated between frames and drained when the frame's
/// [`PlayerAction`] is collected.
pub struct InputManager {
    /// Current held state of all tracked keyboard keys
    keyboard_inputs: HashMap<KeyCode, bool>,
    /// Mouse motion accumulated since the last collected frame
    mouse_delta: Option<(f64, f64)>,
}

impl InputManager {
    /// Creates a new InputManager with all keys released and no pending
    /// mouse motion.
    pub fn new() -> Self {
        let mut keyboard_inputs = HashMap::new();
        for key_code in KEY_CODES {
            keyboard_inputs.insert(key_code, false);
        }
        Self {
            keyboard_inputs,
            mouse_delta: None,
        }
    }

    /// Processes a window event and updates internal keyboard state.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn intake_input(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    state,
                    physical_key: PhysicalKey::Code(key_code),
                    ..
                },
            ..
        } = event
        {
            if let Some(held) = self.keyboard_inputs.get_mut(key_code) {
                *held = state.is_pressed();
            }
        }
    }

    /// Accumulates a raw mouse motion delta.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) motion in pixels since the last device event
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (acc_x, acc_y) = self.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_delta = Some((acc_x + delta.0, acc_y + delta.1));
    }

    /// Releases all keys and drops pending mouse motion.
    ///
    /// Called on focus loss so keys held across the focus change do not
    /// stick.
    pub fn reset_inputs(&mut self) {
        for held in self.keyboard_inputs.values_mut() {
            *held = false;
        }
        self.mouse_delta = None;
    }

    /// Translates the current input state into this frame's player actions
    /// and drains the accumulated mouse motion.
    pub fn collect_actions(&mut self) -> PlayerAction {
        let held = |key: KeyCode| self.keyboard_inputs.get(&key).copied().unwrap_or(false);
        PlayerAction {
            move_forward: held(KeyCode::KeyW),
            move_backward: held(KeyCode::KeyS),
            move_left: held(KeyCode::KeyA),
            move_right: held(KeyCode::KeyD),
            jump: held(KeyCode::Space),
            rotate_view: self.mouse_delta.take(),
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_motion_accumulates_and_drains() {
        let mut manager = InputManager::new();
        manager.intake_mouse_motion((2.0, -1.0));
        manager.intake_mouse_motion((3.0, 4.0));

        let actions = manager.collect_actions();
        assert_eq!(actions.rotate_view, Some((5.0, 3.0)));

        // Drained after collection.
        let actions = manager.collect_actions();
        assert_eq!(actions.rotate_view, None);
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut manager = InputManager::new();
        manager.keyboard_inputs.insert(KeyCode::KeyW, true);
        manager.reset_inputs();
        assert!(!manager.collect_actions().move_forward);
    }
}
