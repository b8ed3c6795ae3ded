//! Ghost spawn scheduler and ghost animation.
//!
//! The scheduler is a chain of one-shot timers:
//!
//! 1. [`schedule_ghost`] waits 8–23 s, then fires `SpawnGhost`
//! 2. [`spawn_ghost`] shows the ghost at a random spot, announces it,
//!    schedules `HideGhost` 2–4 s later and immediately schedules the next
//!    `SpawnGhost`
//! 3. [`hide_ghost`] hides it and scares the player with the configured
//!    probability
//!
//! All of these timers are playing-scoped, so leaving the playing state
//! breaks the chain.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;

use crate::components::ghost::GhostRig;
use crate::components::timer::TimerAction;
use crate::resources::messages::GHOST_APPROACHES_MESSAGE;
use crate::resources::rng::GameRng;
use crate::resources::session::{Session, SessionCmd};
use crate::resources::worldtime::WorldTime;
use crate::systems::session::SessionDriver;

/// Lateral spawn range across the corridor.
pub const GHOST_X_RANGE: (f32, f32) = (-1.5, 1.5);
pub const GHOST_Y: f32 = 1.5;
/// Depth spawn range along the corridor.
pub const GHOST_Z_RANGE: (f32, f32) = (-25.0, -10.0);

pub fn random_ghost_position(rng: &mut GameRng) -> Vector3 {
    let x = rng.range(GHOST_X_RANGE.0, GHOST_X_RANGE.1);
    let z = rng.range(GHOST_Z_RANGE.0, GHOST_Z_RANGE.1);
    Vector3 { x, y: GHOST_Y, z }
}

/// Schedule the next ghost appearance.
pub fn schedule_ghost(driver: &mut SessionDriver, rng: &mut GameRng) -> Entity {
    let delay = driver.tuning().ghost_delay_secs(rng.roll());
    driver.schedule(delay, TimerAction::SpawnGhost)
}

pub fn spawn_ghost(driver: &mut SessionDriver, rng: &mut GameRng) {
    let position = random_ghost_position(rng);
    driver.send(SessionCmd::ShowGhost(position));
    driver.send(SessionCmd::Say(GHOST_APPROACHES_MESSAGE.to_string()));

    let window = driver.tuning().ghost_visible_secs(rng.roll());
    driver.schedule(window, TimerAction::HideGhost);
    schedule_ghost(driver, rng);
}

pub fn hide_ghost(driver: &mut SessionDriver, rng: &mut GameRng) {
    driver.send(SessionCmd::HideGhost);
    let p = driver.tuning().scare_chance;
    if rng.chance(p) {
        driver.send(SessionCmd::Scare);
    }
}

/// Pulse, wobble and float the ghost, and drift its wisps.
pub fn ghost_animation_system(
    time: Res<WorldTime>,
    session: Res<Session>,
    mut query: Query<&mut GhostRig>,
) {
    let t = time.elapsed;
    let ghost = session.ghost();
    for mut rig in query.iter_mut() {
        rig.anchor = ghost.position;
        rig.animate(t);
    }
}
