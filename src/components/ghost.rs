//! Visual rig of the ghost.
//!
//! Whether the ghost is shown and where is session state
//! ([`GhostState`](crate::resources::session::GhostState)); this component
//! only holds what the renderer animates per frame: translucency pulse,
//! wobble, float bob and the wisp trails.

use bevy_ecs::prelude::Component;
use fastrand::Rng;
use raylib::prelude::{Color, Vector3};

use crate::components::particles::ParticleCloud;
use crate::components::prop::hex;

pub const BODY_RADIUS: f32 = 0.3;
pub const BODY_HEIGHT: f32 = 1.0;
pub const HEAD_RADIUS: f32 = 0.25;
pub const HEAD_OFFSET: f32 = 0.9;
pub const EYE_RADIUS: f32 = 0.04;
pub const GLOW_INTENSITY: f32 = 0.5;
pub const GLOW_RANGE: f32 = 5.0;

const FLOAT_SPEED: f32 = 2.0;
const FLOAT_INTENSITY: f32 = 0.3;

#[derive(Component, Debug, Clone)]
pub struct GhostRig {
    /// World position the rig is attached to.
    pub anchor: Vector3,
    /// Body opacity, pulses between 0.1 and 0.5.
    pub opacity: f32,
    /// Rotation around Y in radians.
    pub wobble: f32,
    /// Vertical float offset.
    pub bob: f32,
    pub wisps: ParticleCloud,
    pub body_color: Color,
    pub head_color: Color,
    pub glow_color: Color,
    last_t: f32,
}

impl GhostRig {
    pub fn new(rng: &mut Rng) -> Self {
        GhostRig {
            anchor: Vector3 {
                x: 0.0,
                y: 1.5,
                z: -15.0,
            },
            opacity: 0.4,
            wobble: 0.0,
            bob: 0.0,
            wisps: ParticleCloud::wisps(rng),
            body_color: hex(0xd4d4d4),
            head_color: hex(0xe0e0e0),
            glow_color: hex(0x8888ff),
            last_t: 0.0,
        }
    }

    pub fn animate(&mut self, t: f32) {
        let dt = (t - self.last_t).max(0.0);
        self.last_t = t;
        self.opacity = ghost_opacity(t);
        self.wobble = (t * 2.0).sin() * 0.1;
        self.bob = (t * FLOAT_SPEED / 4.0).sin() / 10.0 * FLOAT_INTENSITY;
        self.wisps.drift(t, dt);
    }

    /// Centre of the body after the float offset.
    pub fn body_center(&self) -> Vector3 {
        Vector3 {
            x: self.anchor.x,
            y: self.anchor.y + self.bob,
            z: self.anchor.z,
        }
    }

    /// Eye positions, rotated with the wobble so they face down the corridor.
    pub fn eyes(&self) -> [Vector3; 2] {
        let c = self.body_center();
        let (s, co) = self.wobble.sin_cos();
        let eye = |dx: f32| {
            let (lx, lz) = (dx, 0.2);
            Vector3 {
                x: c.x + lx * co + lz * s,
                y: c.y + 0.95,
                z: c.z - lx * s + lz * co,
            }
        };
        [eye(-0.08), eye(0.08)]
    }
}

pub fn ghost_opacity(t: f32) -> f32 {
    0.3 + (t * 5.0).sin() * 0.2
}
