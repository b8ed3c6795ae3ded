//! Asylum main entry point.
//!
//! A first-person horror mini-game written in Rust using:
//! - **raylib** for windowing, drawing and input
//! - **bevy_ecs** for entity-component-system architecture
//!
//! The player stands in a dark corridor. The flashlight drains its battery,
//! darkness drains sanity, and a ghost shows up from time to time. The game
//! ends when sanity reaches zero.
//!
//! # Main Loop
//!
//! 1. Parse the command line and load `config.ini`
//! 2. With `--write-config`, save the effective config and exit
//! 3. With `--simulate`, run headless and print JSON snapshots
//! 4. Otherwise open the raylib window, build the ECS world and schedule
//! 5. Each frame: advance `WorldTime`, run the schedule (input, timers,
//!    resource tick, animation, lighting, state changes, rendering)
//! 6. Exit when the window closes or the game enters `Quitting`
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run -- --simulate 60 --seed 7 --dark
//! cargo run -- --config my.ini --write-config
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use asylum::events::switchfullscreen::SwitchFullScreenEvent;
use asylum::game::{core_schedule, init_world};
use asylum::resources::debugmode::DebugMode;
use asylum::resources::gameconfig::GameConfig;
use asylum::resources::gamestate::{GameState, GameStates};
use asylum::resources::hud::HudLayout;
use asylum::simulation::{Policy, run_headless};
use asylum::systems::gamestate::check_pending_state;
use asylum::systems::input::{dispatch_input, update_input_state};
use asylum::systems::lighting::update_light_rig;
use asylum::systems::render::render_system;
use asylum::systems::time::update_world_time;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

/// Asylum
#[derive(Parser)]
#[command(version, about = "A first-person horror mini-game. Find the exit before they find you.")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed the random source for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the debug overlay visible.
    #[arg(long)]
    debug: bool,

    /// Run headless for this many simulated seconds and print JSON
    /// snapshots instead of opening a window.
    #[arg(long, value_name = "SECONDS")]
    simulate: Option<f32>,

    /// Headless only: switch the flashlight off right after starting.
    #[arg(long, requires = "simulate")]
    dark: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path.clone()),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Some(seconds) = cli.simulate {
        let policy = if cli.dark { Policy::Dark } else { Policy::Lit };
        let report = run_headless(config, cli.seed, seconds, policy);
        let lines = report
            .snapshots
            .iter()
            .map(serde_json::to_string)
            .chain(std::iter::once(serde_json::to_string(&report.outcome)));
        for line in lines {
            match line {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize simulation report: {}", e);
                    std::process::exit(1);
                }
            }
        }
        return;
    }

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let start_fullscreen = config.fullscreen;
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Asylum");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Esc is an input action, not raylib's exit key
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    init_world(&mut world, config, cli.seed);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    if cli.debug {
        world.insert_resource(DebugMode {});
    }
    if start_fullscreen {
        world.trigger(SwitchFullScreenEvent {});
        world.flush();
    }

    let mut update = core_schedule();
    update.add_systems(update_input_state.before(dispatch_input));
    update.add_systems(
        render_system
            .after(update_light_rig)
            .after(check_pending_state),
    );
    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {:?}", e);
        std::process::exit(1);
    }

    info!("Asylum started");
    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && world.resource::<GameState>().get() != &GameStates::Quitting
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();

        // Keep the HUD layout in step with window resizes
        let (w, h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        world.resource_mut::<HudLayout>().resize(w, h);
    }
}
