//! Session mutation entry point for systems and observers.
//!
//! [`SessionDriver`] bundles the [`Session`] with what is needed to carry
//! out its [`SessionOutcome`]s: commands for spawning timers, the timer
//! query for restarting the scare window, and [`NextGameState`] for the
//! game-over request. Every gameplay system goes through
//! [`SessionDriver::send`].

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, info};

use crate::components::timer::{Timer, TimerAction, TimerScope};
use crate::resources::gameconfig::{GameConfig, Tuning};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::messages::INTRO_MESSAGE;
use crate::resources::session::{Session, SessionCmd, SessionOutcome, SessionTuning};

#[derive(SystemParam)]
pub struct SessionDriver<'w, 's> {
    session: ResMut<'w, Session>,
    state: Res<'w, GameState>,
    next_state: ResMut<'w, NextGameState>,
    config: Res<'w, GameConfig>,
    timers: Query<'w, 's, (Entity, &'static Timer)>,
    commands: Commands<'w, 's>,
}

impl SessionDriver<'_, '_> {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tuning(&self) -> &Tuning {
        &self.config.tuning
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Ask for a state change. Illegal transitions are refused and logged.
    pub fn request(&mut self, next: GameStates) -> bool {
        if !self.state.get().can_transition_to(&next) {
            debug!("refusing transition {:?} -> {:?}", self.state.get(), next);
            return false;
        }
        self.next_state.set(next);
        true
    }

    /// Start a fresh session: drop every pending timer, pick up the current
    /// tuning and show the intro line.
    pub fn begin(&mut self) {
        self.cancel(None);
        self.session
            .set_tuning(SessionTuning::from(&self.config.tuning));
        self.send(SessionCmd::Begin {
            intro: INTRO_MESSAGE.to_string(),
        });
    }

    /// Apply `cmd` and carry out the resulting outcomes.
    pub fn send(&mut self, cmd: SessionCmd) {
        debug!("session <- {:?}", cmd);
        let outcomes = self.session.apply(cmd);
        for outcome in outcomes {
            match outcome {
                SessionOutcome::MessageAdded(msg) => {
                    let ttl = self.config.tuning.message_ttl_secs();
                    self.schedule(ttl, TimerAction::ExpireMessage(msg));
                }
                SessionOutcome::ScareStarted(generation) => self.restart_scare_window(generation),
                SessionOutcome::FlashlightDied => info!("Flashlight battery exhausted"),
                SessionOutcome::SanityDepleted => {
                    if self.request(GameStates::GameOver) {
                        info!("Sanity depleted");
                    }
                }
            }
        }
    }

    /// Spawn a one-shot timer. The returned entity cancels it when despawned.
    pub fn schedule(&mut self, duration: f32, action: TimerAction) -> Entity {
        debug!("scheduling {:?} in {:.2}s", action, duration);
        self.commands.spawn(Timer::new(duration, action)).id()
    }

    /// Cancel pending timers. `None` cancels every scope.
    pub fn cancel(&mut self, scope: Option<TimerScope>) -> usize {
        let mut cancelled = 0;
        for (entity, timer) in self.timers.iter() {
            if scope.is_none_or(|s| s == timer.scope) {
                self.commands.entity(entity).try_despawn();
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            debug!("cancelled {} pending timer(s) ({:?})", cancelled, scope);
        }
        cancelled
    }

    /// A scare during an active flash restarts its window instead of
    /// queuing. The previous end timer is dropped; if it already fired this
    /// frame its event carries an older generation and is ignored.
    fn restart_scare_window(&mut self, generation: u32) {
        for (entity, timer) in self.timers.iter() {
            if matches!(timer.action, TimerAction::EndScare(_)) {
                self.commands.entity(entity).try_despawn();
            }
        }
        let flash = self.config.tuning.scare_flash_secs();
        self.schedule(flash, TimerAction::EndScare(generation));
    }
}
