use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, NextGameState, NextGameStates};
use bevy_ecs::prelude::*;

/// Fire the state change event when a transition is pending.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    state.is_playing()
}
