//! Free-standing particle clouds (the corridor dust).
//!
//! Ghost wisps live inside the [`GhostRig`](crate::components::ghost::GhostRig)
//! and are drifted by the ghost animation system instead.

use bevy_ecs::prelude::*;

use crate::components::particles::ParticleCloud;
use crate::resources::worldtime::WorldTime;

pub fn particle_drift_system(time: Res<WorldTime>, mut clouds: Query<&mut ParticleCloud>) {
    for mut cloud in clouds.iter_mut() {
        cloud.drift(time.elapsed, time.delta);
    }
}
