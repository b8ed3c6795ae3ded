//! ECS components for entities.
//!
//! Everything drawn in the corridor is an entity carrying one of these.
//!
//! Submodules overview:
//! - [`flicker`] – ceiling lights that stutter after a start delay
//! - [`ghost`] – the apparition's body, head, eyes and glow
//! - [`particles`] – drifting point clouds for dust and ghost wisps
//! - [`prop`] – static corridor geometry with a base colour
//! - [`timer`] – one-shot countdown that triggers a timer event

pub mod flicker;
pub mod ghost;
pub mod particles;
pub mod prop;
pub mod timer;
