//! One-shot countdown timers.
//!
//! A [`Timer`] lives on its own entity. When `elapsed` reaches `duration`
//! the [`update_timers`](crate::systems::timer::update_timers) system
//! triggers a [`TimerEvent`](crate::events::timer::TimerEvent) carrying the
//! timer's [`TimerAction`] and despawns the entity. The entity id is the
//! cancellation handle: despawning it before it fires cancels the action.
//!
//! [`TimerScope`] decides which state transitions tear a timer down.

use bevy_ecs::prelude::Component;

/// What to do when a timer fires.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerAction {
    /// Remove this message from the queue.
    ExpireMessage(String),
    /// End the scare flash of this generation.
    EndScare(u32),
    /// Show the ghost and schedule the next cycle.
    SpawnGhost,
    /// Hide the ghost and maybe scare the player.
    HideGhost,
}

impl TimerAction {
    /// Scope a timer for this action should be spawned with.
    pub fn default_scope(&self) -> TimerScope {
        match self {
            TimerAction::ExpireMessage(_) | TimerAction::EndScare(_) => TimerScope::Session,
            TimerAction::SpawnGhost | TimerAction::HideGhost => TimerScope::Playing,
        }
    }
}

/// Lifetime of a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerScope {
    /// Cancelled as soon as the game leaves the playing state.
    Playing,
    /// Survives into game over; cancelled when a new session begins.
    Session,
}

#[derive(Component, Debug, Clone)]
pub struct Timer {
    pub duration: f32,
    pub elapsed: f32,
    pub action: TimerAction,
    pub scope: TimerScope,
    /// Set on the frame the timer fires; the entity is despawned with it.
    pub finished: bool,
}

impl Timer {
    pub fn new(duration: f32, action: TimerAction) -> Self {
        let scope = action.default_scope();
        Timer {
            duration,
            elapsed: 0.0,
            action,
            scope,
            finished: false,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.finished = false;
    }

    /// Advance by `dt` seconds. Returns `true` on the tick it finishes.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.finished {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.finished = true;
            return true;
        }
        false
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_when_duration_reached() {
        let mut t = Timer::new(1.0, TimerAction::EndScare(1));
        assert!(!t.tick(0.5));
        assert!(t.tick(0.5));
        assert!(!t.tick(0.5));
        assert!(t.finished);
    }

    #[test]
    fn reset_rearms() {
        let mut t = Timer::new(0.5, TimerAction::EndScare(1));
        assert!(t.tick(0.5));
        t.reset();
        assert!(!t.finished);
        assert_eq!(t.remaining(), 0.5);
        assert!(t.tick(0.5));
    }

    #[test]
    fn scopes_follow_action() {
        assert_eq!(
            Timer::new(1.0, TimerAction::ExpireMessage("x".into())).scope,
            TimerScope::Session
        );
        assert_eq!(Timer::new(1.0, TimerAction::EndScare(1)).scope, TimerScope::Session);
        assert_eq!(Timer::new(1.0, TimerAction::SpawnGhost).scope, TimerScope::Playing);
        assert_eq!(Timer::new(1.0, TimerAction::HideGhost).scope, TimerScope::Playing);
    }

    #[test]
    fn zero_duration_fires_on_first_tick() {
        let mut t = Timer::new(0.0, TimerAction::HideGhost);
        assert!(t.tick(0.0));
    }
}
