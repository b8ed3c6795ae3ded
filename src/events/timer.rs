//! Timer expiration events.
//!
//! When a [`Timer`](crate::components::timer::Timer) reaches its duration,
//! a [`TimerEvent`] is triggered. The single observer
//! [`timer_observer`](crate::systems::timer::timer_observer) turns the action
//! into session commands.
//!
//! # Related
//!
//! - [`crate::components::timer::Timer`] – the timer component
//! - [`crate::systems::timer::update_timers`] – the system that emits these events

use bevy_ecs::prelude::*;

use crate::components::timer::{TimerAction, TimerScope};

/// Event emitted when a timer expires.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TimerEvent {
    /// The entity that held the timer. Already queued for despawn.
    pub entity: Entity,
    pub action: TimerAction,
    pub scope: TimerScope,
}
