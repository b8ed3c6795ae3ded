//! Advance every [`FlickeringLight`] to the current world time.

use bevy_ecs::prelude::*;

use crate::components::flicker::FlickeringLight;
use crate::resources::worldtime::WorldTime;

pub fn flicker_system(time: Res<WorldTime>, mut lights: Query<&mut FlickeringLight>) {
    for mut light in lights.iter_mut() {
        light.update(time.elapsed);
    }
}
