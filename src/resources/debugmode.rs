//! Debug toggle resource.
//!
//! The mere presence of this resource turns on the debug overlay: FPS,
//! session levels, pending timers and the ghost position. Remove it to hide
//! the overlay.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws the debug overlay.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
