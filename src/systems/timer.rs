//! Timer systems.
//!
//! - [`update_timers`] – advances every [`Timer`] and triggers a
//!   [`TimerEvent`] for those that finish, despawning their entity
//! - [`timer_observer`] – turns a fired action into session commands
//!
//! # System Flow
//!
//! Each frame:
//!
//! 1. `update_timers` accumulates `WorldTime::delta` on all timers
//! 2. When `elapsed >= duration`, triggers `TimerEvent` and despawns the entity
//! 3. `timer_observer` receives the event and drives the session
//!
//! Playing-scoped actions that arrive while the game is not playing are
//! dropped. They can only be stragglers from a session that already ended.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::timer::{Timer, TimerAction, TimerScope};
use crate::events::timer::TimerEvent;
use crate::resources::rng::GameRng;
use crate::resources::session::SessionCmd;
use crate::resources::worldtime::WorldTime;
use crate::systems::ghost::{hide_ghost, spawn_ghost};
use crate::systems::session::SessionDriver;

/// Advance all timers and fire the ones that finish this frame.
pub fn update_timers(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
    mut commands: Commands,
) {
    for (entity, mut timer) in query.iter_mut() {
        if timer.tick(world_time.delta) {
            commands.trigger(TimerEvent {
                entity,
                action: timer.action.clone(),
                scope: timer.scope,
            });
            commands.entity(entity).try_despawn();
        }
    }
}

/// Observer that executes a fired timer's action.
pub fn timer_observer(
    trigger: On<TimerEvent>,
    mut driver: SessionDriver,
    mut rng: ResMut<GameRng>,
) {
    let event = trigger.event();
    if event.scope == TimerScope::Playing && !driver.is_playing() {
        debug!("ignoring stale {:?}", event.action);
        return;
    }
    match &event.action {
        TimerAction::ExpireMessage(msg) => driver.send(SessionCmd::Expire(msg.clone())),
        TimerAction::EndScare(generation) => driver.send(SessionCmd::EndScare(*generation)),
        TimerAction::SpawnGhost => spawn_ghost(&mut driver, &mut rng),
        TimerAction::HideGhost => hide_ghost(&mut driver, &mut rng),
    }
}
