//! Ceiling lights that stutter.
//!
//! Each [`FlickeringLight`] stays at its resting intensity until `delay`
//! has passed since the scene started, then follows
//! [`flicker_intensity`] every frame.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector3};

use crate::components::prop::hex;

pub const RESTING_INTENSITY: f32 = 0.3;
pub const MIN_INTENSITY: f32 = 0.05;
pub const LIGHT_RANGE: f32 = 8.0;

#[derive(Component, Debug, Clone)]
pub struct FlickeringLight {
    pub position: Vector3,
    /// Seconds after scene start before flickering begins.
    pub delay: f32,
    pub active: bool,
    pub intensity: f32,
    pub range: f32,
    pub color: Color,
}

impl FlickeringLight {
    pub fn new(position: Vector3, delay: f32) -> Self {
        FlickeringLight {
            position,
            delay,
            active: false,
            intensity: RESTING_INTENSITY,
            range: LIGHT_RANGE,
            color: hex(0xff9944),
        }
    }

    /// Update for scene time `t` in seconds.
    pub fn update(&mut self, t: f32) {
        if !self.active && t >= self.delay {
            self.active = true;
        }
        if self.active {
            self.intensity = flicker_intensity(t, self.delay);
        }
    }
}

/// Interference of three sines plus a slow blackout pulse. `delay` is in
/// seconds and only shifts the blackout phase between lights.
pub fn flicker_intensity(t: f32, delay: f32) -> f32 {
    let flicker = (t * 20.0).sin() * (t * 33.0).sin() * (t * 47.0).sin();
    let delay_ms = delay * 1000.0;
    let dark = if (t * 0.5 + delay_ms * 0.01).sin() > 0.8 {
        0.0
    } else {
        1.0
    };
    ((0.4 + flicker * 0.3) * dark).max(MIN_INTENSITY)
}
