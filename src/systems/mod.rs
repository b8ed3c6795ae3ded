//! Game systems.
//!
//! Submodules overview
//! - [`flicker`] – advance the ceiling lights
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`ghost`] – schedule, show, hide and animate the ghost
//! - [`input`] – read hardware input and turn it into intents
//! - [`lighting`] – rebuild the light rig from the scene
//! - [`particles`] – drift dust
//! - [`render`] – draw the corridor, HUD and debug overlay using Raylib
//! - [`session`] – apply session commands and carry out their outcomes
//! - [`ticker`] – sanity and battery tick with ambient messages
//! - [`time`] – update simulation time and delta
//! - [`timer`] – count down timers and dispatch their actions

pub mod flicker;
pub mod gamestate;
pub mod ghost;
pub mod input;
pub mod lighting;
pub mod particles;
pub mod render;
pub mod session;
pub mod ticker;
pub mod time;
pub mod timer;
