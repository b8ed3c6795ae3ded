//! ECS resources made available to systems.
//!
//! Long-lived data injected into the world: the session, the clock, input,
//! the camera and the light rig.
//!
//! Overview
//! - `camera3d` – orbit camera the player drags around
//! - `debugmode` – presence toggles the debug overlay
//! - `fullscreen` – presence marks borderless fullscreen
//! - `gameconfig` – window, controls and tuning loaded from `config.ini`
//! - `gamestate` – authoritative and pending high-level game state
//! - `hud` – screen-space layout and hit testing
//! - `input` – per-frame keyboard and mouse state
//! - `lighting` – lights and fog used to colour the scene
//! - `messages` – bounded on-screen message queue and texts
//! - `rng` – seedable random source
//! - `session` – sanity, battery, flashlight, scare and ghost state
//! - `systemsstore` – registry of state hooks by name
//! - `ticker` – fixed-period accumulator for the resource tick
//! - `worldtime` – simulation time and delta
pub mod camera3d;
pub mod debugmode;
pub mod fullscreen;
pub mod gameconfig;
pub mod gamestate;
pub mod hud;
pub mod input;
pub mod lighting;
pub mod messages;
pub mod rng;
pub mod session;
pub mod systemsstore;
pub mod ticker;
pub mod worldtime;
