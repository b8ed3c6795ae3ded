//! Drifting point clouds (dust in the air, wisps under the ghost).
//!
//! Points bob vertically with `y += sin(t * rate + i) * step`, where `step`
//! is the per-frame displacement at 60 fps scaled by the real frame time.

use bevy_ecs::prelude::Component;
use fastrand::Rng;
use raylib::prelude::{Color, Vector3};

use crate::components::prop::hex;

/// Reference frame time the drift steps are expressed in.
const REFERENCE_DT: f32 = 1.0 / 60.0;

#[derive(Component, Debug, Clone)]
pub struct ParticleCloud {
    pub points: Vec<Vector3>,
    /// Angular rate of the drift phase.
    pub rate: f32,
    /// Displacement per reference frame.
    pub step: f32,
    pub size: f32,
    pub color: Color,
    pub opacity: f32,
}

impl ParticleCloud {
    /// 200 specks filling the corridor volume.
    pub fn dust(rng: &mut Rng) -> Self {
        let points = (0..200)
            .map(|_| Vector3 {
                x: (rng.f32() - 0.5) * 8.0,
                y: rng.f32() * 3.0,
                z: -rng.f32() * 30.0,
            })
            .collect();
        ParticleCloud {
            points,
            rate: 1.0,
            step: 0.001,
            size: 0.02,
            color: hex(0xd4b896),
            opacity: 0.4,
        }
    }

    /// 50 trails in a ring under the ghost, relative to its anchor.
    pub fn wisps(rng: &mut Rng) -> Self {
        let count = 50;
        let points = (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * std::f32::consts::TAU;
                let radius = 0.2 + rng.f32() * 0.3;
                Vector3 {
                    x: angle.cos() * radius,
                    y: -0.5 - rng.f32(),
                    z: angle.sin() * radius,
                }
            })
            .collect();
        ParticleCloud {
            points,
            rate: 3.0,
            step: 0.005,
            size: 0.05,
            color: hex(0xaaaadd),
            opacity: 0.4,
        }
    }

    /// Advance the drift for scene time `t` and frame delta `dt`.
    pub fn drift(&mut self, t: f32, dt: f32) {
        let scale = dt / REFERENCE_DT;
        for (i, p) in self.points.iter_mut().enumerate() {
            p.y += (t * self.rate + i as f32).sin() * self.step * scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dust_fills_corridor_volume() {
        let mut rng = Rng::with_seed(9);
        let dust = ParticleCloud::dust(&mut rng);
        assert_eq!(dust.points.len(), 200);
        for p in &dust.points {
            assert!((-4.0..=4.0).contains(&p.x));
            assert!((0.0..=3.0).contains(&p.y));
            assert!((-30.0..=0.0).contains(&p.z));
        }
    }

    #[test]
    fn wisps_hang_below_anchor() {
        let mut rng = Rng::with_seed(9);
        let wisps = ParticleCloud::wisps(&mut rng);
        assert_eq!(wisps.points.len(), 50);
        assert!(wisps.points.iter().all(|p| p.y <= -0.5 && p.y >= -1.5));
    }

    #[test]
    fn drift_is_frame_rate_independent() {
        let mut rng = Rng::with_seed(1);
        let mut a = ParticleCloud::dust(&mut rng);
        let mut b = a.clone();
        a.drift(0.0, REFERENCE_DT * 2.0);
        b.drift(0.0, REFERENCE_DT);
        b.drift(0.0, REFERENCE_DT);
        for (pa, pb) in a.points.iter().zip(b.points.iter()) {
            assert!((pa.y - pb.y).abs() < 1e-5);
        }
    }

    #[test]
    fn zero_dt_does_not_move() {
        let mut rng = Rng::with_seed(2);
        let mut a = ParticleCloud::wisps(&mut rng);
        let before = a.points.clone();
        a.drift(3.0, 0.0);
        assert_eq!(a.points, before);
    }
}
