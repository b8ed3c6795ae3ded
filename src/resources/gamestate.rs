//! High-level game state resources.
//!
//! These resources track the authoritative current state of the game and any
//! pending transition requested by systems. See
//! `crate::events::gamestate::observe_gamestate_change_event` for how a
//! transition is applied and hooks are invoked.

use bevy_ecs::prelude::Resource;

/// Discrete high-level states the game can be in.
///
/// `Start`, `Playing` and `GameOver` are what the player sees. `None`,
/// `Setup` and `Quitting` bracket the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    Setup,
    Start,
    Playing,
    GameOver,
    Quitting,
}

impl GameStates {
    /// Whether a transition from `self` to `next` is legal.
    ///
    /// Playing is only entered from the title or game-over screens, and
    /// game over is only reachable from playing. Quitting is always allowed.
    pub fn can_transition_to(&self, next: &GameStates) -> bool {
        matches!(
            (self, next),
            (GameStates::None, GameStates::Setup)
                | (GameStates::Setup, GameStates::Start)
                | (GameStates::Start, GameStates::Playing)
                | (GameStates::GameOver, GameStates::Playing)
                | (GameStates::Playing, GameStates::GameOver)
                | (_, GameStates::Quitting)
        )
    }

    /// Lower-case name used in logs and snapshots.
    pub fn label(&self) -> &'static str {
        match self {
            GameStates::None => "none",
            GameStates::Setup => "setup",
            GameStates::Start => "start",
            GameStates::Playing => "playing",
            GameStates::GameOver => "gameover",
            GameStates::Quitting => "quitting",
        }
    }
}

/// Representation of a requested next state.
///
/// Use [`NextGameState::set`] to mark a transition as pending; an observer
/// will later apply it and reset the value to [`NextGameStates::Unchanged`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

/// Authoritative current game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::None`].
    pub fn new() -> Self {
        GameState {
            current: GameStates::None,
        }
    }
    /// Read-only access to the current state.
    pub fn get(&self) -> &GameStates {
        &self.current
    }
    /// Update the current state immediately.
    ///
    /// Prefer requesting transitions via [`NextGameState`] and the event
    /// observer when setup/teardown hooks must be triggered.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
    pub fn is_playing(&self) -> bool {
        self.current == GameStates::Playing
    }
}

/// Intent to change to a new game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    /// Create a new value initialized to [`NextGameStates::Unchanged`].
    pub fn new() -> Self {
        NextGameState {
            next: NextGameStates::Unchanged,
        }
    }

    /// Get the current transition request.
    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    /// Request a transition to `next` by marking it as pending.
    ///
    /// The system `check_pending_state` emits the change event; the observer
    /// validates and applies it.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    /// Reset to [`NextGameStates::Unchanged`].
    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}
