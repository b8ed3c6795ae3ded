//! Frame clock.
//!
//! [`update_world_time`] runs outside the schedule, before it, once per
//! frame. A frame delta longer than [`MAX_FRAME_DT`] (window dragged, process
//! suspended) is clamped so pending timers and the resource tick catch up
//! gradually instead of firing in one burst.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

pub const MAX_FRAME_DT: f32 = 0.25;

/// Advance [`WorldTime`] by the unscaled frame delta `dt` in seconds.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled = dt.clamp(0.0, MAX_FRAME_DT) * wt.time_scale;
    wt.elapsed += scaled;
    wt.delta = scaled;
    wt.frame_count += 1;
}
