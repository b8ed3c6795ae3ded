//! Rebuild the [`LightRig`] for this frame.
//!
//! Collects the flickering ceiling lights, the ghost glow while the ghost is
//! on screen, and the flashlight spot along the view direction when it is
//! lit. Fog closes in when the flashlight is off.

use bevy_ecs::prelude::*;

use crate::components::flicker::FlickeringLight;
use crate::components::ghost::{GLOW_INTENSITY, GLOW_RANGE, GhostRig};
use crate::resources::camera3d::OrbitCamera;
use crate::resources::gamestate::GameState;
use crate::resources::lighting::{Fog, LightRig, PointLight, SpotLight};
use crate::resources::session::Session;

pub fn update_light_rig(
    mut rig: ResMut<LightRig>,
    camera: Res<OrbitCamera>,
    session: Res<Session>,
    state: Res<GameState>,
    lights: Query<&FlickeringLight>,
    ghosts: Query<&GhostRig>,
) {
    let eye = camera.eye();
    rig.eye = eye;
    rig.points.clear();
    for light in lights.iter() {
        rig.points.push(PointLight {
            position: light.position,
            color: light.color,
            intensity: light.intensity,
            range: light.range,
        });
    }

    if state.is_playing() && session.ghost().visible {
        for ghost in ghosts.iter() {
            rig.points.push(PointLight {
                position: ghost.body_center(),
                color: ghost.glow_color,
                intensity: GLOW_INTENSITY,
                range: GLOW_RANGE,
            });
        }
    }

    let lit = session.flashlight_lit();
    rig.spot = lit.then(|| SpotLight::flashlight(eye, camera.forward()));
    rig.fog = Fog::for_flashlight(lit);
}
