//! Per-frame light rig and CPU shading.
//!
//! raylib's immediate-mode shapes are unlit, so every prop is tinted on the
//! CPU: ambient + point lights + the flashlight spot, then blended toward
//! the fog colour by distance from the eye. The rig is rebuilt each frame by
//! [`update_light_rig`](crate::systems::lighting::update_light_rig).

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Color, Vector3};
use smallvec::SmallVec;

use crate::components::prop::hex;

/// Scales summed light so a flashlight hit on a dark wall reads clearly.
const EXPOSURE: f32 = 2.2;

pub const FOG_NEAR: f32 = 1.0;
pub const FOG_FAR_LIT: f32 = 20.0;
pub const FOG_FAR_DARK: f32 = 8.0;

pub const FLASHLIGHT_INTENSITY: f32 = 3.0;
pub const FLASHLIGHT_ANGLE: f32 = 0.5;
pub const FLASHLIGHT_PENUMBRA: f32 = 0.5;
pub const FLASHLIGHT_RANGE: f32 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vector3,
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vector3,
    /// Unit direction.
    pub direction: Vector3,
    pub color: Color,
    pub intensity: f32,
    /// Half-angle of the cone in radians.
    pub angle: f32,
    /// Fraction of the cone that fades out, 0..1.
    pub penumbra: f32,
    pub range: f32,
}

impl SpotLight {
    pub fn flashlight(position: Vector3, direction: Vector3) -> Self {
        SpotLight {
            position,
            direction,
            color: hex(0xfff5e0),
            intensity: FLASHLIGHT_INTENSITY,
            angle: FLASHLIGHT_ANGLE,
            penumbra: FLASHLIGHT_PENUMBRA,
            range: FLASHLIGHT_RANGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    pub fn for_flashlight(lit: bool) -> Self {
        Fog {
            color: hex(0x080505),
            near: FOG_NEAR,
            far: if lit { FOG_FAR_LIT } else { FOG_FAR_DARK },
        }
    }

    /// 0 = no fog, 1 = fully fogged.
    pub fn factor(&self, distance: f32) -> f32 {
        if self.far <= self.near {
            return 1.0;
        }
        ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct LightRig {
    pub eye: Vector3,
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub points: SmallVec<[PointLight; 4]>,
    pub spot: Option<SpotLight>,
    pub fog: Fog,
}

impl Default for LightRig {
    fn default() -> Self {
        LightRig {
            eye: Vector3 {
                x: 0.0,
                y: 1.6,
                z: 0.0,
            },
            ambient_color: hex(0x1a1a2e),
            ambient_intensity: 0.02,
            points: SmallVec::new(),
            spot: None,
            fog: Fog::for_flashlight(true),
        }
    }
}

fn channels(c: Color) -> [f32; 3] {
    [c.r as f32 / 255.0, c.g as f32 / 255.0, c.b as f32 / 255.0]
}

fn delta(a: Vector3, b: Vector3) -> (f32, f32, f32) {
    (a.x - b.x, a.y - b.y, a.z - b.z)
}

fn distance(a: Vector3, b: Vector3) -> f32 {
    let (x, y, z) = delta(a, b);
    (x * x + y * y + z * z).sqrt()
}

/// Smooth falloff to zero at `range`.
fn falloff(d: f32, range: f32) -> f32 {
    if range <= 0.0 || d >= range {
        return 0.0;
    }
    let k = 1.0 - d / range;
    k * k
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x >= edge1 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl LightRig {
    /// Light received at `p` from point light `l`, 0.. per unit intensity.
    fn point_term(l: &PointLight, p: Vector3) -> f32 {
        l.intensity * falloff(distance(l.position, p), l.range)
    }

    fn spot_term(s: &SpotLight, p: Vector3) -> f32 {
        let (x, y, z) = delta(p, s.position);
        let d = (x * x + y * y + z * z).sqrt();
        if d < 1e-4 {
            return s.intensity;
        }
        let cos_theta = (x * s.direction.x + y * s.direction.y + z * s.direction.z) / d;
        let outer = s.angle.cos();
        let inner = (s.angle * (1.0 - s.penumbra)).cos();
        s.intensity * smoothstep(outer, inner, cos_theta) * falloff(d, s.range)
    }

    /// Total light reaching `p`, without colour. Useful for tests and debug.
    pub fn illuminance(&self, p: Vector3) -> f32 {
        let mut total = self.ambient_intensity;
        for l in &self.points {
            total += Self::point_term(l, p);
        }
        if let Some(s) = &self.spot {
            total += Self::spot_term(s, p);
        }
        total
    }

    /// Colour of a surface with `base` colour at `p`.
    pub fn shade(&self, base: Color, p: Vector3, opacity: f32) -> Color {
        let albedo = channels(base);
        let mut light = channels(self.ambient_color).map(|c| c * self.ambient_intensity);
        for l in &self.points {
            let k = Self::point_term(l, p);
            let c = channels(l.color);
            for i in 0..3 {
                light[i] += c[i] * k;
            }
        }
        if let Some(s) = &self.spot {
            let k = Self::spot_term(s, p);
            let c = channels(s.color);
            for i in 0..3 {
                light[i] += c[i] * k;
            }
        }

        let fog = self.fog.factor(distance(self.eye, p));
        let fog_c = channels(self.fog.color);
        let mut out = [0u8; 3];
        for i in 0..3 {
            let lit = (albedo[i] * light[i] * EXPOSURE).min(1.0);
            let v = lit + (fog_c[i] - lit) * fog;
            out[i] = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::new(out[0], out[1], out[2], a)
    }

    /// Emissive surfaces only fade with fog.
    pub fn fog_only(&self, base: Color, p: Vector3, opacity: f32) -> Color {
        let fog = self.fog.factor(distance(self.eye, p));
        let b = channels(base);
        let f = channels(self.fog.color);
        let mix = |i: usize| ((b[i] + (f[i] - b[i]) * fog).clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::new(
            mix(0),
            mix(1),
            mix(2),
            (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }
}
