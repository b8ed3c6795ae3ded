//! World assembly, scene setup and state hooks.
//!
//! [`init_world`] inserts every resource and observer the game needs and
//! registers the state hooks. [`core_schedule`] is the per-frame schedule
//! shared by the windowed binary and the headless simulation; the binary
//! adds raylib polling and rendering on top of it.
//!
//! Hooks, keyed in [`SystemsStore`]:
//!
//! | hook | runs on | does |
//! |---|---|---|
//! | `setup` | enter Setup | spawns the corridor, then asks for Start |
//! | `enter_start` | enter Start | logs the title screen |
//! | `enter_play` | enter Playing | fresh session, first ghost |
//! | `exit_play` | leave Playing | cancels playing timers, hides the ghost |
//! | `enter_gameover` | enter GameOver | "Your mind shattered..." |
//! | `quit_game` | enter Quitting | logs; the main loop exits |

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::prelude::{Color, Vector3};

use crate::components::flicker::FlickeringLight;
use crate::components::ghost::GhostRig;
use crate::components::particles::ParticleCloud;
use crate::components::prop::{Prop, hex};
use crate::components::timer::TimerScope;
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::switchdebug::switch_debug_observer;
use crate::events::switchfullscreen::switch_fullscreen_observer;
use crate::resources::camera3d::OrbitCamera;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::hud::HudLayout;
use crate::resources::input::InputState;
use crate::resources::lighting::LightRig;
use crate::resources::messages::MIND_SHATTERED_MESSAGE;
use crate::resources::rng::GameRng;
use crate::resources::session::{Session, SessionCmd, SessionTuning};
use crate::resources::systemsstore::{SystemsStore, hooks};
use crate::resources::ticker::TickClock;
use crate::resources::worldtime::WorldTime;
use crate::systems::flicker::flicker_system;
use crate::systems::gamestate::{check_pending_state, state_is_playing};
use crate::systems::ghost::{ghost_animation_system, schedule_ghost};
use crate::systems::input::{dispatch_input, input_action_observer, mouse_look};
use crate::systems::lighting::update_light_rig;
use crate::systems::particles::particle_drift_system;
use crate::systems::session::SessionDriver;
use crate::systems::ticker::resource_tick_system;
use crate::systems::timer::{timer_observer, update_timers};

/// Corridor half width (walls at x = ±3).
pub const HALF_WIDTH: f32 = 3.0;
pub const CEILING_Y: f32 = 3.0;
/// Far end of the corridor.
pub const END_Z: f32 = -35.0;
/// Wall behind the player.
pub const BACK_Z: f32 = 5.0;

const PANEL: f32 = 0.02;
const LIGHT_POSITIONS: [(f32, f32); 3] = [(-5.0, 0.0), (-15.0, 0.5), (-25.0, 1.2)];
const LIGHT_Y: f32 = 2.8;

fn v(x: f32, y: f32, z: f32) -> Vector3 {
    Vector3 { x, y, z }
}

/// Insert resources, observers and hooks, then enter Setup.
///
/// After this returns the scene is spawned and Start is pending; the first
/// frame of [`core_schedule`] applies it.
pub fn init_world(world: &mut World, config: GameConfig, seed: Option<u64>) {
    let (w, h) = config.window_size();
    let mut input = InputState::default();
    if !input.rebind_flashlight(&config.flashlight_key) {
        warn!(
            "Unknown flashlight key {:?}, keeping the default",
            config.flashlight_key
        );
    }
    let camera = OrbitCamera {
        rotate_speed: config.rotate_speed,
        ..OrbitCamera::default()
    };

    world.insert_resource(WorldTime::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(Session::new(SessionTuning::from(&config.tuning)));
    world.insert_resource(GameRng::new(seed));
    world.insert_resource(TickClock::default());
    world.insert_resource(LightRig::default());
    world.insert_resource(camera);
    world.insert_resource(HudLayout::new(w as i32, h as i32));
    world.insert_resource(input);
    world.insert_resource(config);

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(timer_observer));
    world.spawn(Observer::new(input_action_observer));
    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(switch_fullscreen_observer));

    let mut systems_store = SystemsStore::new();
    systems_store.register(world, hooks::SETUP, setup);
    systems_store.register(world, hooks::ENTER_START, enter_start);
    systems_store.register(world, hooks::ENTER_PLAY, enter_play);
    systems_store.register(world, hooks::EXIT_PLAY, exit_play);
    systems_store.register(world, hooks::ENTER_GAMEOVER, enter_gameover);
    systems_store.register(world, hooks::QUIT_GAME, quit_game);
    world.insert_resource(systems_store);
    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {});
    world.flush();
}

/// Systems that run every frame, windowed or not.
pub fn core_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems((dispatch_input, mouse_look).chain());
    update.add_systems(update_timers.after(dispatch_input));
    update.add_systems(
        resource_tick_system
            .run_if(state_is_playing)
            .after(update_timers),
    );
    update.add_systems(flicker_system);
    update.add_systems(particle_drift_system);
    update.add_systems(ghost_animation_system.after(update_timers));
    update.add_systems(
        update_light_rig
            .after(flicker_system)
            .after(ghost_animation_system)
            .after(resource_tick_system)
            .after(mouse_look),
    );
    update.add_systems(check_pending_state.after(resource_tick_system));
    update
}

/// Spawn a flat surface of `cols` x `rows` one-metre cells so lighting
/// varies across it. `origin` is the centre of the first cell; `du` and `dv`
/// step between cells.
fn spawn_panel(
    commands: &mut Commands,
    origin: Vector3,
    du: Vector3,
    dv: Vector3,
    (cols, rows): (u32, u32),
    cell: Vector3,
    color: Color,
) {
    for i in 0..cols {
        for j in 0..rows {
            let (fi, fj) = (i as f32, j as f32);
            let p = v(
                origin.x + du.x * fi + dv.x * fj,
                origin.y + du.y * fi + dv.y * fj,
                origin.z + du.z * fi + dv.z * fj,
            );
            commands.spawn(Prop::cube(p, cell, color));
        }
    }
}

fn spawn_corridor(commands: &mut Commands, rng: &mut GameRng) {
    let depth = (BACK_Z - END_Z) as u32;
    let width = (HALF_WIDTH * 2.0) as u32;
    let height = CEILING_Y as u32;
    let x0 = -HALF_WIDTH + 0.5;
    let z0 = BACK_Z - 0.5;
    let back = v(0.0, 0.0, -1.0);

    // Floor and ceiling.
    spawn_panel(
        commands,
        v(x0, -PANEL / 2.0, z0),
        v(1.0, 0.0, 0.0),
        back,
        (width, depth),
        v(1.0, PANEL, 1.0),
        hex(0x1a1512),
    );
    spawn_panel(
        commands,
        v(x0, CEILING_Y + PANEL / 2.0, z0),
        v(1.0, 0.0, 0.0),
        back,
        (width, depth),
        v(1.0, PANEL, 1.0),
        hex(0x0d0a08),
    );
    // Side walls.
    for side in [-1.0, 1.0] {
        spawn_panel(
            commands,
            v(side * (HALF_WIDTH + PANEL / 2.0), 0.5, z0),
            v(0.0, 1.0, 0.0),
            back,
            (height, depth),
            v(PANEL, 1.0, 1.0),
            hex(0x1f1815),
        );
    }
    // End and back walls.
    for z in [END_Z - PANEL / 2.0, BACK_Z + PANEL / 2.0] {
        spawn_panel(
            commands,
            v(x0, 0.5, z),
            v(1.0, 0.0, 0.0),
            v(0.0, 1.0, 0.0),
            (width, height),
            v(1.0, 1.0, PANEL),
            hex(0x0a0808),
        );
    }

    // Pipes along the walls.
    let pipe = hex(0x3d3530);
    for (x, y, z, length) in [
        (-2.9, 2.7, -10.0, 8.0),
        (2.9, 0.3, -20.0, 12.0),
        (-2.9, 0.3, -25.0, 6.0),
    ] {
        commands.spawn(Prop::cylinder(v(x, y, z), v(0.0, 0.0, 1.0), length, 0.08, pipe));
    }

    // Debris scattered on the floor.
    for _ in 0..15 {
        let scale = rng.range(0.1, 0.25);
        let p = v(rng.range(-2.5, 2.5), 0.05, -rng.range(0.0, 30.0));
        commands.spawn(Prop::cube(
            p,
            v(scale, 0.3 * scale, scale),
            hex(0x2a2420),
        ));
    }

    // Blood stains.
    for (x, z, scale) in [(-2.0, -8.0, 0.8), (1.5, -18.0, 1.2), (-1.0, -28.0, 0.6)] {
        commands.spawn(Prop::disc(v(x, 0.01, z), 0.5 * scale, hex(0x3d1010)).with_opacity(0.7));
    }

    // Doors: frame flush with the wall, panel standing ajar.
    for (x, z, ajar) in [(-2.95, -12.0, 0.2), (2.95, -22.0, -0.2)] {
        let inward: f32 = if x < 0.0 { 1.0 } else { -1.0 };
        commands.spawn(Prop::cube(v(x, 1.3, z), v(0.1, 2.4, 1.2), hex(0x2a2018)));
        commands.spawn(Prop::cube(
            v(x + inward * (0.05 + 0.45 * f32::sin(ajar).abs()), 1.3, z + 0.3 * inward),
            v(0.08, 2.2, 0.9),
            hex(0x1a1510),
        ));
    }
}

/// Spawn the static scene and move on to the title screen.
pub fn setup(mut commands: Commands, mut rng: ResMut<GameRng>, mut driver: SessionDriver) {
    spawn_corridor(&mut commands, &mut rng);

    for (z, delay) in LIGHT_POSITIONS {
        commands.spawn(FlickeringLight::new(v(0.0, LIGHT_Y, z), delay));
    }
    commands.spawn(ParticleCloud::dust(&mut rng.0));
    commands.spawn(GhostRig::new(&mut rng.0));

    info!("Scene ready");
    driver.request(GameStates::Start);
}

pub fn enter_start() {
    info!("Title screen");
}

/// Fresh session: every pending timer is dropped, levels reset, intro shown,
/// tick phase reset and the ghost cycle started.
pub fn enter_play(
    mut driver: SessionDriver,
    mut rng: ResMut<GameRng>,
    mut clock: ResMut<TickClock>,
) {
    driver.begin();
    clock.reset();
    schedule_ghost(&mut driver, &mut rng);
    info!("Session started");
}

pub fn exit_play(mut driver: SessionDriver) {
    driver.cancel(Some(TimerScope::Playing));
    driver.send(SessionCmd::HideGhost);
}

pub fn enter_gameover(mut driver: SessionDriver) {
    driver.send(SessionCmd::Say(MIND_SHATTERED_MESSAGE.to_string()));
    let s = driver.session();
    info!(
        "Game over after {} ticks (battery {:.1})",
        s.ticks(),
        s.battery()
    );
}

pub fn quit_game() {
    info!("Quitting");
}
