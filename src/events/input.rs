//! Input action events.
//!
//! This module defines [`InputEvent`] which is triggered when a
//! gameplay-relevant input action happens. Keyboard presses and HUD button
//! clicks both end up here, so the observer in
//! [`crate::systems::input`] is the single place where input turns into
//! session commands and state requests.

use bevy_ecs::prelude::*;

/// Enumeration of logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Start from the title screen or restart after game over
    /// (default: Enter or Space, or the on-screen button).
    Start,
    /// Switch the flashlight (default: F, or the on-screen button).
    ToggleFlashlight,
    /// Leave the game (default: Escape).
    Quit,
}

/// Event emitted when an input action is pressed.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    /// The input action that triggered this event.
    pub action: InputAction,
}
