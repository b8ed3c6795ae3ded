//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from raylib each frame and
//!   writes the results into [`InputState`].
//! - [`dispatch_input`] turns this frame's presses and HUD clicks into
//!   [`InputEvent`]s, plus the debug and fullscreen toggle events.
//! - [`mouse_look`] feeds left-button drags to the [`OrbitCamera`].
//! - [`input_action_observer`] executes an [`InputEvent`] against the
//!   session and the state machine.
//!
//! Only the first system touches raylib, so everything downstream can be
//! driven from tests by writing `InputState` directly.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::MouseButton;

use crate::events::input::{InputAction, InputEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::events::switchfullscreen::SwitchFullScreenEvent;
use crate::resources::camera3d::OrbitCamera;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::hud::{HudButton, HudLayout};
use crate::resources::input::InputState;
use crate::resources::session::{Session, SessionCmd};
use crate::systems::session::SessionDriver;

/// Poll raylib for keyboard and mouse input and update `InputState`.
pub fn update_input_state(mut input: ResMut<InputState>, rl: NonSendMut<raylib::RaylibHandle>) {
    for key in input.keys_mut() {
        let binding = key.key_binding;
        key.update(
            rl.is_key_down(binding),
            rl.is_key_pressed(binding),
            rl.is_key_released(binding),
        );
    }
    let pos = rl.get_mouse_position();
    input.mouse.update(
        pos.x,
        pos.y,
        rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
        rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT),
    );
}

/// Emit events for keys pressed and HUD buttons clicked this frame.
pub fn dispatch_input(
    input: Res<InputState>,
    hud: Res<HudLayout>,
    state: Res<GameState>,
    session: Res<Session>,
    mut commands: Commands,
) {
    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
    if input.fullscreen_toggle.just_pressed {
        commands.trigger(SwitchFullScreenEvent {});
    }

    let mut actions: Vec<InputAction> = Vec::new();
    if input.action_start.just_pressed || input.action_start_alt.just_pressed {
        actions.push(InputAction::Start);
    }
    if input.flashlight_toggle.just_pressed {
        actions.push(InputAction::ToggleFlashlight);
    }
    if input.action_back.just_pressed {
        actions.push(InputAction::Quit);
    }
    if input.mouse.left_pressed {
        let hit = hud.hit(input.mouse.x, input.mouse.y, state.get(), session.battery());
        match hit {
            Some(HudButton::Start) | Some(HudButton::Restart) => actions.push(InputAction::Start),
            Some(HudButton::Flashlight) => actions.push(InputAction::ToggleFlashlight),
            None => {}
        }
    }

    for action in actions {
        commands.trigger(InputEvent { action });
    }
}

/// Rotate the view while the left button is dragged.
pub fn mouse_look(input: Res<InputState>, hud: Res<HudLayout>, mut camera: ResMut<OrbitCamera>) {
    let (dx, dy) = input.mouse.drag();
    if dx != 0.0 || dy != 0.0 {
        camera.apply_drag(dx, dy, hud.height);
    }
}

/// Observer that applies an input action.
///
/// Start is only honoured on the title and game-over screens; the
/// flashlight only responds while playing. Everything else is dropped.
pub fn input_action_observer(trigger: On<InputEvent>, mut driver: SessionDriver) {
    let action = trigger.event().action;
    match action {
        InputAction::Start => {
            if !driver.request(GameStates::Playing) {
                debug!("start ignored outside the title and game-over screens");
            }
        }
        InputAction::ToggleFlashlight => {
            if driver.is_playing() {
                driver.send(SessionCmd::ToggleFlashlight);
            } else {
                debug!("flashlight toggle ignored outside play");
            }
        }
        InputAction::Quit => {
            info!("Quit requested");
            driver.request(GameStates::Quitting);
        }
    }
}
