use std::collections::HashSet;

use glam::Vec2;
use log::debug;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Primary pointer as last reported by the window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Position in screen pixels.
    pub position: Vec2,
    pub is_down: bool,
}

#[derive(Default)]
pub struct InputHandler {
    pressed_keys: HashSet<KeyCode>,
    pointer: PointerState,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_keyboard_input_event(&mut self, keycode: KeyCode, pressed: bool) {
        if pressed {
            self.pressed_keys.insert(keycode);
        } else {
            self.pressed_keys.remove(&keycode);
        }
    }

    pub fn handle_cursor_moved(&mut self, x: f64, y: f64) {
        self.pointer.position = Vec2::new(x as f32, y as f32);
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.pointer.is_down = state == ElementState::Pressed;
            debug!("Pointer {:?} at {:?}", state, self.pointer.position);
        }
    }

    /// Drops held keys and buttons, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pointer.is_down = false;
    }

    pub fn is_pressed(&self, keycode: KeyCode) -> bool {
        self.pressed_keys.contains(&keycode)
    }

    pub fn any_pressed(&self, keycodes: &[KeyCode]) -> bool {
        keycodes.iter().any(|k| self.pressed_keys.contains(k))
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }
}
