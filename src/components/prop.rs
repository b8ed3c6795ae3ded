//! Static scenery.
//!
//! A [`Prop`] is one solid piece of the corridor drawn every frame with the
//! colour the light rig computes for its position. Props never move.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropShape {
    /// Axis-aligned box with full extents.
    Cube { size: Vector3 },
    Sphere { radius: f32 },
    /// Cylinder between `position - half` and `position + half`.
    Cylinder { half: Vector3, radius: f32 },
    /// Flat disc lying on the floor.
    Disc { radius: f32 },
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Prop {
    pub position: Vector3,
    pub shape: PropShape,
    pub color: Color,
    /// 0 = invisible, 1 = opaque.
    pub opacity: f32,
    /// Emissive props ignore lighting and fog.
    pub emissive: bool,
}

impl Prop {
    pub fn cube(position: Vector3, size: Vector3, color: Color) -> Self {
        Prop {
            position,
            shape: PropShape::Cube { size },
            color,
            opacity: 1.0,
            emissive: false,
        }
    }

    pub fn sphere(position: Vector3, radius: f32, color: Color) -> Self {
        Prop {
            position,
            shape: PropShape::Sphere { radius },
            color,
            opacity: 1.0,
            emissive: false,
        }
    }

    /// Cylinder centred on `position`, running along `axis` for `length`.
    pub fn cylinder(position: Vector3, axis: Vector3, length: f32, radius: f32, color: Color) -> Self {
        let h = length * 0.5;
        Prop {
            position,
            shape: PropShape::Cylinder {
                half: Vector3 {
                    x: axis.x * h,
                    y: axis.y * h,
                    z: axis.z * h,
                },
                radius,
            },
            color,
            opacity: 1.0,
            emissive: false,
        }
    }

    pub fn disc(position: Vector3, radius: f32, color: Color) -> Self {
        Prop {
            position,
            shape: PropShape::Disc { radius },
            color,
            opacity: 1.0,
            emissive: false,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn emissive(mut self) -> Self {
        self.emissive = true;
        self
    }
}

/// Build a colour from a `0xRRGGBB` literal.
pub fn hex(rgb: u32) -> Color {
    Color::new(
        ((rgb >> 16) & 0xff) as u8,
        ((rgb >> 8) & 0xff) as u8,
        (rgb & 0xff) as u8,
        255,
    )
}
