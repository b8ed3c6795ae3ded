//! Drag-to-look orbit camera.
//!
//! The eye orbits a fixed target a few metres down the corridor. Dragging
//! changes the azimuth freely and the polar angle within
//! [`MIN_POLAR`]..[`MAX_POLAR`]; there is no zoom and no pan.
//!
//! Angles follow the usual spherical convention with Y up:
//! `offset = r * (sin(phi) sin(theta), cos(phi), sin(phi) cos(theta))`.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera3D, Vector3};
use std::f32::consts::PI;

pub const MIN_POLAR: f32 = PI * 0.3;
pub const MAX_POLAR: f32 = PI * 0.7;
pub const FOV_Y: f32 = 75.0;

#[derive(Resource, Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: Vector3,
    pub radius: f32,
    /// Horizontal angle in radians, unbounded.
    pub azimuth: f32,
    /// Angle from +Y in radians, clamped.
    pub polar: f32,
    pub rotate_speed: f32,
}

impl Default for OrbitCamera {
    /// Eye at head height at the corridor mouth, looking down the corridor.
    fn default() -> Self {
        OrbitCamera::looking_from(
            Vector3 {
                x: 0.0,
                y: 1.6,
                z: 0.0,
            },
            Vector3 {
                x: 0.0,
                y: 1.6,
                z: -5.0,
            },
            0.5,
        )
    }
}

impl OrbitCamera {
    pub fn looking_from(eye: Vector3, target: Vector3, rotate_speed: f32) -> Self {
        let dx = eye.x - target.x;
        let dy = eye.y - target.y;
        let dz = eye.z - target.z;
        let radius = (dx * dx + dy * dy + dz * dz).sqrt().max(1e-3);
        OrbitCamera {
            target,
            radius,
            azimuth: dx.atan2(dz),
            polar: (dy / radius).clamp(-1.0, 1.0).acos().clamp(MIN_POLAR, MAX_POLAR),
            rotate_speed,
        }
    }

    /// Apply a pointer drag of `(dx, dy)` pixels on a viewport `height`
    /// pixels tall. A drag the full height turns a full circle at speed 1.
    pub fn apply_drag(&mut self, dx: f32, dy: f32, height: f32) {
        if height <= 0.0 {
            return;
        }
        let k = std::f32::consts::TAU / height * self.rotate_speed;
        self.azimuth -= dx * k;
        self.polar = (self.polar - dy * k).clamp(MIN_POLAR, MAX_POLAR);
    }

    pub fn eye(&self) -> Vector3 {
        let (sp, cp) = self.polar.sin_cos();
        let (st, ct) = self.azimuth.sin_cos();
        Vector3 {
            x: self.target.x + self.radius * sp * st,
            y: self.target.y + self.radius * cp,
            z: self.target.z + self.radius * sp * ct,
        }
    }

    /// Unit view direction from the eye to the target.
    pub fn forward(&self) -> Vector3 {
        let eye = self.eye();
        let (x, y, z) = (
            self.target.x - eye.x,
            self.target.y - eye.y,
            self.target.z - eye.z,
        );
        let len = (x * x + y * y + z * z).sqrt().max(1e-6);
        Vector3 {
            x: x / len,
            y: y / len,
            z: z / len,
        }
    }

    pub fn camera(&self) -> Camera3D {
        Camera3D::perspective(
            self.eye(),
            self.target,
            Vector3 {
                x: 0.0,
                y: 1.0,
                z: 0.0,
            },
            FOV_Y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn default_eye_is_at_corridor_mouth() {
        let cam = OrbitCamera::default();
        let eye = cam.eye();
        assert!(approx_eq(eye.x, 0.0));
        assert!(approx_eq(eye.y, 1.6));
        assert!(approx_eq(eye.z, 0.0));
        assert!(approx_eq(cam.radius, 5.0));
        let f = cam.forward();
        assert!(approx_eq(f.z, -1.0));
    }

    #[test]
    fn polar_is_clamped_for_any_drag() {
        let mut cam = OrbitCamera::default();
        for dy in [5000.0, -12000.0, 300.0, -1.0, 99999.0] {
            cam.apply_drag(0.0, dy, 720.0);
            assert!(cam.polar >= MIN_POLAR - 1e-6);
            assert!(cam.polar <= MAX_POLAR + 1e-6);
        }
    }

    #[test]
    fn azimuth_is_free() {
        let mut cam = OrbitCamera::default();
        cam.apply_drag(720.0 * 4.0, 0.0, 720.0);
        assert!(approx_eq(cam.azimuth, -std::f32::consts::TAU * 2.0));
        // Radius never changes: no zoom.
        let eye = cam.eye();
        let d = ((eye.x - cam.target.x).powi(2)
            + (eye.y - cam.target.y).powi(2)
            + (eye.z - cam.target.z).powi(2))
        .sqrt();
        assert!(approx_eq(d, 5.0));
    }

    #[test]
    fn zero_height_viewport_is_ignored() {
        let mut cam = OrbitCamera::default();
        let before = (cam.azimuth, cam.polar);
        cam.apply_drag(100.0, 100.0, 0.0);
        assert_eq!(before, (cam.azimuth, cam.polar));
    }
}
