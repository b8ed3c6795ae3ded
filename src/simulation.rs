//! Headless run of the core schedule.
//!
//! Builds the same world as the windowed game, presses Start, optionally
//! switches the flashlight off, and steps a fixed frame time until the
//! requested number of seconds has passed or the game is over. One
//! [`SessionSnapshot`] is recorded per simulated second. With a fixed seed
//! the whole run is deterministic.

use bevy_ecs::prelude::*;
use log::info;
use serde::Serialize;

use crate::events::input::{InputAction, InputEvent};
use crate::game::{core_schedule, init_world};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::session::{Session, SessionSnapshot};
use crate::resources::worldtime::WorldTime;
use crate::systems::time::update_world_time;

/// Fixed frame time of the simulation. Exactly representable so that tick
/// accumulation does not drift.
pub const FRAME_DT: f32 = 0.0625;

/// What the simulated player does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Leave the flashlight on.
    #[default]
    Lit,
    /// Switch the flashlight off right after starting.
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub seconds: f32,
    pub state: &'static str,
    pub survived: bool,
    pub sanity: f32,
    pub battery: f32,
    pub ticks: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub snapshots: Vec<SessionSnapshot>,
    pub outcome: Outcome,
}

/// Run the game without a window for up to `seconds` of simulated time.
pub fn run_headless(config: GameConfig, seed: Option<u64>, seconds: f32, policy: Policy) -> Report {
    let mut world = World::new();
    init_world(&mut world, config, seed);
    let mut update = core_schedule();

    // Setup -> Start.
    step(&mut world, &mut update, 0.0);
    world.trigger(InputEvent {
        action: InputAction::Start,
    });
    // Start -> Playing.
    step(&mut world, &mut update, 0.0);
    if policy == Policy::Dark {
        world.trigger(InputEvent {
            action: InputAction::ToggleFlashlight,
        });
        world.flush();
    }

    let started = world.resource::<WorldTime>().elapsed;
    let mut snapshots = Vec::new();
    let mut next_report = 1.0;
    loop {
        step(&mut world, &mut update, FRAME_DT);
        let since = world.resource::<WorldTime>().elapsed - started;
        let over = world.resource::<GameState>().get() == &GameStates::GameOver;
        if since + 1e-4 >= next_report || over {
            snapshots.push(snapshot(&world, since));
            next_report += 1.0;
        }
        if over || since + 1e-4 >= seconds {
            break;
        }
    }

    let since = world.resource::<WorldTime>().elapsed - started;
    let state = world.resource::<GameState>().get().clone();
    let session = world.resource::<Session>();
    let outcome = Outcome {
        seconds: since,
        state: state.label(),
        survived: state != GameStates::GameOver,
        sanity: session.sanity(),
        battery: session.battery(),
        ticks: session.ticks(),
    };
    info!(
        "Simulation finished after {:.2}s in state {}",
        outcome.seconds, outcome.state
    );
    Report { snapshots, outcome }
}

fn step(world: &mut World, update: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    update.run(world);
}

fn snapshot(world: &World, since: f32) -> SessionSnapshot {
    let state = world.resource::<GameState>().get();
    world.resource::<Session>().snapshot(state, since)
}
