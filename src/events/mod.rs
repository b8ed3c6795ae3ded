//! Event types and observers.
//!
//! Events decouple the systems that notice something from the code that
//! reacts to it. Observers are spawned once in [`crate::game::init_world`].
//!
//! Submodules:
//! - [`gamestate`] – apply a pending state transition and run its hooks
//! - [`input`] – player intents (start, toggle flashlight, quit)
//! - [`switchdebug`] – toggle the debug overlay
//! - [`switchfullscreen`] – toggle borderless fullscreen
//! - [`timer`] – a one-shot timer fired
pub mod gamestate;
pub mod input;
pub mod switchdebug;
pub mod switchfullscreen;
pub mod timer;
