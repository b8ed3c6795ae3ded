//! Fullscreen marker.
//!
//! Inserted by the fullscreen observer when the window goes fullscreen and
//! removed when it returns to the configured window size.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy)]
pub struct FullScreen {}
