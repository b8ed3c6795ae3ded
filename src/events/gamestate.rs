//! Game state transition event and observer.
//!
//! Systems request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which checks the transition is legal, applies it
//! to [`GameState`] and runs the exit/enter hooks stored in
//! [`SystemsStore`].
//!
//! Hooks run as one-shot systems queued on `Commands`, so they see the new
//! state already in place.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::{SystemsStore, hooks};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// - Reads the intention from [`NextGameState`] and always clears it.
/// - Refuses transitions [`GameStates::can_transition_to`] rejects.
/// - Otherwise sets [`GameState`], then runs the exit hook of the old state
///   followed by the enter hook of the new one.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Option<Res<SystemsStore>>,
) {
    let (Some(next_game_state), Some(game_state), Some(systems_store)) = (
        next_game_state.as_deref_mut(),
        game_state.as_deref_mut(),
        systems_store.as_deref(),
    ) else {
        warn!("Game state resources missing, transition not applied");
        return;
    };

    let new_state = match next_game_state.get().clone() {
        Pending(new_state) => new_state,
        Unchanged => {
            debug!("No state change pending.");
            return;
        }
    };
    next_game_state.reset();

    let old_state = game_state.get().clone();
    if !old_state.can_transition_to(&new_state) {
        warn!("Illegal transition {:?} -> {:?} ignored", old_state, new_state);
        return;
    }

    info!("Transitioning from {:?} to {:?}", old_state, new_state);
    game_state.set(new_state.clone());
    on_state_exit(&old_state, &mut commands, systems_store);
    on_state_enter(&new_state, &mut commands, systems_store);
}

fn run_hook(name: &str, commands: &mut Commands, systems_store: &SystemsStore) {
    match systems_store.get(name) {
        Some(id) => commands.run_system(*id),
        None => warn!("Hook {:?} not registered", name),
    }
}

/// Run state-specific "enter" systems for the given state.
fn on_state_enter(state: &GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    match state {
        GameStates::None => debug!("Entered None state"),
        GameStates::Setup => run_hook(hooks::SETUP, commands, systems_store),
        GameStates::Start => run_hook(hooks::ENTER_START, commands, systems_store),
        GameStates::Playing => run_hook(hooks::ENTER_PLAY, commands, systems_store),
        GameStates::GameOver => run_hook(hooks::ENTER_GAMEOVER, commands, systems_store),
        GameStates::Quitting => run_hook(hooks::QUIT_GAME, commands, systems_store),
    }
}

/// Run state-specific "exit" systems for the given state.
fn on_state_exit(state: &GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    match state {
        GameStates::Playing => run_hook(hooks::EXIT_PLAY, commands, systems_store),
        other => debug!("Exited {:?} state", other),
    }
}
