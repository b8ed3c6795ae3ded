//! Per-frame keyboard and mouse input resource.
//!
//! Captures the subset of input state the game cares about and exposes it
//! to systems via the [`InputState`] resource. Enter and Space start or
//! restart, F toggles the flashlight, the left mouse button drags the view.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    fn bound(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }

    /// Record this frame's key state.
    pub fn update(&mut self, down: bool, pressed: bool, released: bool) {
        self.active = down;
        self.just_pressed = pressed;
        self.just_released = released;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Pointer position and left-button drag state in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    /// Movement since the previous frame.
    pub dx: f32,
    pub dy: f32,
    pub left_down: bool,
    pub left_pressed: bool,
}

impl MouseState {
    /// Record a new pointer position and button state.
    pub fn update(&mut self, x: f32, y: f32, left_down: bool, left_pressed: bool) {
        self.dx = x - self.x;
        self.dy = y - self.y;
        self.x = x;
        self.y = y;
        self.left_down = left_down;
        self.left_pressed = left_pressed;
    }

    /// Drag delta for this frame, zero unless the left button is held and
    /// was already held last frame.
    pub fn drag(&self) -> (f32, f32) {
        if self.left_down && !self.left_pressed {
            (self.dx, self.dy)
        } else {
            (0.0, 0.0)
        }
    }
}

/// Resource capturing the per-frame input relevant to the game.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub action_start: BoolState,
    pub action_start_alt: BoolState,
    pub flashlight_toggle: BoolState,
    pub action_back: BoolState,
    pub mode_debug: BoolState,
    pub fullscreen_toggle: BoolState,
    pub mouse: MouseState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            action_start: BoolState::bound(KeyboardKey::KEY_ENTER),
            action_start_alt: BoolState::bound(KeyboardKey::KEY_SPACE),
            flashlight_toggle: BoolState::bound(KeyboardKey::KEY_F),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
            fullscreen_toggle: BoolState::bound(KeyboardKey::KEY_F10),
            mouse: MouseState::default(),
        }
    }
}

impl InputState {
    /// Mutable access to every key binding, for polling in one loop.
    pub fn keys_mut(&mut self) -> [&mut BoolState; 6] {
        [
            &mut self.action_start,
            &mut self.action_start_alt,
            &mut self.flashlight_toggle,
            &mut self.action_back,
            &mut self.mode_debug,
            &mut self.fullscreen_toggle,
        ]
    }

    /// Replace the flashlight binding from a key name such as `"F"` or
    /// `"L"`. Unknown names leave the binding unchanged.
    pub fn rebind_flashlight(&mut self, name: &str) -> bool {
        match key_from_name(name) {
            Some(key) => {
                self.flashlight_toggle.key_binding = key;
                true
            }
            None => false,
        }
    }
}

/// Map a single letter or a few named keys to a raylib key.
pub fn key_from_name(name: &str) -> Option<KeyboardKey> {
    let key = match name.trim().to_ascii_uppercase().as_str() {
        "A" => KeyboardKey::KEY_A,
        "E" => KeyboardKey::KEY_E,
        "F" => KeyboardKey::KEY_F,
        "L" => KeyboardKey::KEY_L,
        "Q" => KeyboardKey::KEY_Q,
        "R" => KeyboardKey::KEY_R,
        "T" => KeyboardKey::KEY_T,
        "TAB" => KeyboardKey::KEY_TAB,
        "SPACE" => KeyboardKey::KEY_SPACE,
        "ENTER" => KeyboardKey::KEY_ENTER,
        _ => return None,
    };
    Some(key)
}
