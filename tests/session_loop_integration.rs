//! Integration tests for the session loop.
//!
//! Each test builds the full world with `init_world`, runs `core_schedule`
//! with explicit frame deltas and observes the session, the game state and
//! the pending timers. Frame deltas are powers of two so tick and timer
//! accumulation is exact.

use asylum::components::timer::{Timer, TimerAction};
use asylum::events::input::{InputAction, InputEvent};
use asylum::game::{core_schedule, init_world};
use asylum::resources::gameconfig::GameConfig;
use asylum::resources::gamestate::{GameState, GameStates, NextGameState};
use asylum::resources::messages::{
    FLASHLIGHT_DIED_MESSAGE, GHOST_APPROACHES_MESSAGE, INTRO_MESSAGE, MIND_SHATTERED_MESSAGE,
};
use asylum::resources::session::Session;
use asylum::systems::time::update_world_time;
use bevy_ecs::prelude::*;

/// Config with no randomness in play: no ambient lines, no scares and a
/// ghost that never shows within a test.
fn quiet_config() -> GameConfig {
    let mut config = GameConfig::new();
    config.tuning.tick_ms = 125;
    config.tuning.ambient_chance = 0.0;
    config.tuning.scare_chance = 0.0;
    config.tuning.ghost_delay_min_ms = 1_000_000;
    config.tuning.ghost_delay_spread_ms = 0;
    config
}

fn step(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

fn press(world: &mut World, action: InputAction) {
    world.trigger(InputEvent { action });
    world.flush();
}

fn state(world: &World) -> GameStates {
    world.resource::<GameState>().get().clone()
}

fn timers_with(world: &mut World, action: &TimerAction) -> usize {
    world
        .query::<&Timer>()
        .iter(world)
        .filter(|t| &t.action == action)
        .count()
}

fn count_action(world: &mut World, pred: fn(&TimerAction) -> bool) -> usize {
    world
        .query::<&Timer>()
        .iter(world)
        .filter(|t| pred(&t.action))
        .count()
}

/// Build the world and go through Setup -> Start -> Playing.
fn playing_world(config: GameConfig) -> (World, Schedule) {
    let mut world = World::new();
    init_world(&mut world, config, Some(42));
    let mut schedule = core_schedule();
    step(&mut world, &mut schedule, 0.0);
    assert_eq!(state(&world), GameStates::Start);
    press(&mut world, InputAction::Start);
    step(&mut world, &mut schedule, 0.0);
    assert_eq!(state(&world), GameStates::Playing);
    (world, schedule)
}

#[test]
fn start_flow_opens_fresh_session() {
    let (mut world, _schedule) = playing_world(quiet_config());

    let session = world.resource::<Session>();
    assert_eq!(session.sanity(), 100.0);
    assert_eq!(session.battery(), 100.0);
    assert!(session.flashlight_on());
    assert_eq!(session.messages().iter().collect::<Vec<_>>(), vec![INTRO_MESSAGE]);

    assert_eq!(
        timers_with(&mut world, &TimerAction::ExpireMessage(INTRO_MESSAGE.to_string())),
        1
    );
    assert_eq!(timers_with(&mut world, &TimerAction::SpawnGhost), 1);
}

#[test]
fn start_is_ignored_while_playing() {
    let (mut world, mut schedule) = playing_world(quiet_config());
    press(&mut world, InputAction::Start);
    step(&mut world, &mut schedule, 0.0);
    assert_eq!(state(&world), GameStates::Playing);
    // Still the first session: one ghost chain, not two.
    assert_eq!(timers_with(&mut world, &TimerAction::SpawnGhost), 1);
}

#[test]
fn battery_dies_after_two_hundred_ticks() {
    let (mut world, mut schedule) = playing_world(quiet_config());

    for _ in 0..199 {
        step(&mut world, &mut schedule, 0.125);
    }
    {
        let session = world.resource::<Session>();
        assert_eq!(session.ticks(), 199);
        assert_eq!(session.battery(), 0.5);
        assert!(session.flashlight_on());
        assert_eq!(session.sanity(), 100.0);
    }

    step(&mut world, &mut schedule, 0.125);
    let session = world.resource::<Session>();
    assert_eq!(session.battery(), 0.0);
    assert!(!session.flashlight_on());
    assert!(!session.flashlight_lit());
    assert!(session.messages().contains(FLASHLIGHT_DIED_MESSAGE));

    // Dark from now on: the next tick costs sanity.
    step(&mut world, &mut schedule, 0.125);
    let session = world.resource::<Session>();
    assert!(session.sanity() < 100.0);
    assert_eq!(session.battery(), 0.0);
}

#[test]
fn dead_battery_cannot_be_switched_back_on() {
    let mut config = quiet_config();
    config.tuning.battery_drain = 50.0;
    let (mut world, mut schedule) = playing_world(config);
    step(&mut world, &mut schedule, 0.125);
    step(&mut world, &mut schedule, 0.125);
    assert!(!world.resource::<Session>().flashlight_on());

    press(&mut world, InputAction::ToggleFlashlight);
    assert!(!world.resource::<Session>().flashlight_on());
}

#[test]
fn toggle_is_ignored_on_title_screen() {
    let mut world = World::new();
    init_world(&mut world, quiet_config(), Some(1));
    let mut schedule = core_schedule();
    step(&mut world, &mut schedule, 0.0);
    press(&mut world, InputAction::ToggleFlashlight);
    assert!(world.resource::<Session>().flashlight_on());
}

#[test]
fn game_over_fires_once() {
    let mut config = quiet_config();
    config.tuning.sanity_drain = 10.0;
    let (mut world, mut schedule) = playing_world(config);
    press(&mut world, InputAction::ToggleFlashlight);

    for _ in 0..9 {
        step(&mut world, &mut schedule, 0.125);
    }
    assert_eq!(state(&world), GameStates::Playing);
    assert_eq!(world.resource::<Session>().sanity(), 10.0);

    step(&mut world, &mut schedule, 0.125);
    assert_eq!(state(&world), GameStates::GameOver);

    // Several more frames, including a long one: nothing else happens.
    step(&mut world, &mut schedule, 0.25);
    step(&mut world, &mut schedule, 0.125);
    assert_eq!(state(&world), GameStates::GameOver);

    let session = world.resource::<Session>();
    assert_eq!(session.sanity(), 0.0);
    assert_eq!(session.ticks(), 10);
    let shattered = session
        .messages()
        .iter()
        .filter(|m| *m == MIND_SHATTERED_MESSAGE)
        .count();
    assert_eq!(shattered, 1);
    assert_eq!(timers_with(&mut world, &TimerAction::SpawnGhost), 0);
}

#[test]
fn restart_cancels_previous_session_timers() {
    let mut config = quiet_config();
    config.tuning.sanity_drain = 50.0;
    let (mut world, mut schedule) = playing_world(config);
    press(&mut world, InputAction::ToggleFlashlight);
    step(&mut world, &mut schedule, 0.125);
    step(&mut world, &mut schedule, 0.125);
    assert_eq!(state(&world), GameStates::GameOver);
    assert!(count_action(&mut world, |a| matches!(a, TimerAction::ExpireMessage(_))) >= 2);

    press(&mut world, InputAction::Start);
    step(&mut world, &mut schedule, 0.0);
    assert_eq!(state(&world), GameStates::Playing);

    let session = world.resource::<Session>();
    assert_eq!(session.sanity(), 100.0);
    assert_eq!(session.battery(), 100.0);
    assert!(session.flashlight_on());
    assert_eq!(session.ticks(), 0);
    assert_eq!(session.messages().iter().collect::<Vec<_>>(), vec![INTRO_MESSAGE]);

    // Only the new session's timers remain.
    assert_eq!(
        count_action(&mut world, |a| matches!(a, TimerAction::ExpireMessage(_))),
        1
    );
    assert_eq!(timers_with(&mut world, &TimerAction::SpawnGhost), 1);
}

#[test]
fn messages_expire_after_their_lifetime() {
    let mut config = quiet_config();
    config.tuning.message_ttl_ms = 500;
    let (mut world, mut schedule) = playing_world(config);
    for _ in 0..3 {
        step(&mut world, &mut schedule, 0.125);
    }
    assert!(world.resource::<Session>().messages().contains(INTRO_MESSAGE));
    step(&mut world, &mut schedule, 0.125);
    assert!(world.resource::<Session>().messages().is_empty());
}

#[test]
fn intro_message_lasts_four_seconds_by_default() {
    let mut config = quiet_config();
    assert_eq!(config.tuning.message_ttl_ms, 4000);
    config.tuning.tick_ms = 60_000;
    let (mut world, mut schedule) = playing_world(config);
    for _ in 0..31 {
        step(&mut world, &mut schedule, 0.125);
    }
    assert!(world.resource::<Session>().messages().contains(INTRO_MESSAGE));
    step(&mut world, &mut schedule, 0.125);
    assert!(!world.resource::<Session>().messages().contains(INTRO_MESSAGE));
}

#[test]
fn stale_ghost_timers_are_ignored_after_game_over() {
    let mut config = quiet_config();
    config.tuning.sanity_drain = 100.0;
    let (mut world, mut schedule) = playing_world(config);
    press(&mut world, InputAction::ToggleFlashlight);
    step(&mut world, &mut schedule, 0.125);
    assert_eq!(state(&world), GameStates::GameOver);

    world.spawn(Timer::new(0.125, TimerAction::SpawnGhost));
    step(&mut world, &mut schedule, 0.125);

    let session = world.resource::<Session>();
    assert!(!session.ghost().visible);
    assert!(!session.messages().contains(GHOST_APPROACHES_MESSAGE));
    assert_eq!(timers_with(&mut world, &TimerAction::HideGhost), 0);
}

#[test]
fn ghost_cycle_shows_hides_and_repeats() {
    let mut config = quiet_config();
    config.tuning.tick_ms = 60_000;
    config.tuning.ghost_delay_min_ms = 1000;
    config.tuning.ghost_visible_min_ms = 500;
    config.tuning.ghost_visible_spread_ms = 0;
    let (mut world, mut schedule) = playing_world(config);

    for _ in 0..7 {
        step(&mut world, &mut schedule, 0.125);
    }
    assert!(!world.resource::<Session>().ghost().visible);

    step(&mut world, &mut schedule, 0.125);
    {
        let session = world.resource::<Session>();
        assert!(session.ghost().visible);
        assert!(session.messages().contains(GHOST_APPROACHES_MESSAGE));
        let p = session.ghost().position;
        assert!((-1.5..=1.5).contains(&p.x));
        assert!((-25.0..=-10.0).contains(&p.z));
        assert_eq!(p.y, 1.5);
    }
    assert_eq!(timers_with(&mut world, &TimerAction::HideGhost), 1);
    assert_eq!(timers_with(&mut world, &TimerAction::SpawnGhost), 1);

    for _ in 0..4 {
        step(&mut world, &mut schedule, 0.125);
    }
    assert!(!world.resource::<Session>().ghost().visible);
    // No scare with a zero chance.
    assert!(!world.resource::<Session>().scare_active());
    assert_eq!(world.resource::<Session>().sanity(), 100.0);

    for _ in 0..4 {
        step(&mut world, &mut schedule, 0.125);
    }
    assert!(world.resource::<Session>().ghost().visible);
}

#[test]
fn scare_during_flash_restarts_the_window() {
    let mut config = quiet_config();
    config.tuning.tick_ms = 60_000;
    config.tuning.scare_chance = 1.0;
    config.tuning.scare_flash_ms = 500;
    let (mut world, mut schedule) = playing_world(config);

    world.spawn(Timer::new(0.125, TimerAction::HideGhost));
    step(&mut world, &mut schedule, 0.125);
    assert!(world.resource::<Session>().scare_active());
    assert_eq!(world.resource::<Session>().sanity(), 85.0);

    step(&mut world, &mut schedule, 0.25);
    world.spawn(Timer::new(0.125, TimerAction::HideGhost));
    step(&mut world, &mut schedule, 0.125);
    assert_eq!(world.resource::<Session>().sanity(), 70.0);
    assert_eq!(
        count_action(&mut world, |a| matches!(a, TimerAction::EndScare(_))),
        1
    );

    // The first flash would have ended here; the second keeps it on.
    step(&mut world, &mut schedule, 0.25);
    step(&mut world, &mut schedule, 0.125);
    assert!(world.resource::<Session>().scare_active());

    step(&mut world, &mut schedule, 0.125);
    assert!(!world.resource::<Session>().scare_active());
}

#[test]
fn scare_landing_as_the_flash_ends_keeps_a_full_window() {
    let mut config = quiet_config();
    config.tuning.tick_ms = 60_000;
    config.tuning.scare_chance = 1.0;
    config.tuning.scare_flash_ms = 500;
    let (mut world, mut schedule) = playing_world(config);

    // The second ghost vanishes on the very frame the first flash ends.
    world.spawn(Timer::new(0.125, TimerAction::HideGhost));
    world.spawn(Timer::new(0.625, TimerAction::HideGhost));
    step(&mut world, &mut schedule, 0.125);
    assert!(world.resource::<Session>().scare_active());

    for _ in 0..4 {
        step(&mut world, &mut schedule, 0.125);
    }
    assert_eq!(world.resource::<Session>().sanity(), 70.0);
    assert!(world.resource::<Session>().scare_active());
    assert_eq!(
        count_action(&mut world, |a| matches!(a, TimerAction::EndScare(_))),
        1
    );

    for _ in 0..3 {
        step(&mut world, &mut schedule, 0.125);
    }
    assert!(world.resource::<Session>().scare_active());
    step(&mut world, &mut schedule, 0.125);
    assert!(!world.resource::<Session>().scare_active());
}

#[test]
fn illegal_transition_is_refused() {
    let mut world = World::new();
    init_world(&mut world, quiet_config(), Some(5));
    let mut schedule = core_schedule();
    step(&mut world, &mut schedule, 0.0);
    assert_eq!(state(&world), GameStates::Start);

    world.resource_mut::<NextGameState>().set(GameStates::GameOver);
    step(&mut world, &mut schedule, 0.0);
    assert_eq!(state(&world), GameStates::Start);
}

#[test]
fn quitting_from_play_tears_down_the_ghost_chain() {
    let (mut world, mut schedule) = playing_world(quiet_config());
    press(&mut world, InputAction::Quit);
    step(&mut world, &mut schedule, 0.0);
    assert_eq!(state(&world), GameStates::Quitting);
    assert_eq!(timers_with(&mut world, &TimerAction::SpawnGhost), 0);
    assert!(!world.resource::<Session>().ghost().visible);
}
