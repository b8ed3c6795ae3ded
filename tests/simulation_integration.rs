//! Integration tests for the headless simulation.

use asylum::resources::gameconfig::GameConfig;
use asylum::simulation::{Policy, run_headless};

#[test]
fn same_seed_same_report() {
    let a = run_headless(GameConfig::new(), Some(1234), 20.0, Policy::Lit);
    let b = run_headless(GameConfig::new(), Some(1234), 20.0, Policy::Lit);
    let ja = serde_json::to_string(&a).expect("serialize report a");
    let jb = serde_json::to_string(&b).expect("serialize report b");
    assert_eq!(ja, jb);
}

#[test]
fn staying_dark_ends_in_game_over() {
    let report = run_headless(GameConfig::new(), Some(7), 120.0, Policy::Dark);
    assert!(!report.outcome.survived);
    assert_eq!(report.outcome.state, "gameover");
    assert_eq!(report.outcome.sanity, 0.0);
    assert_eq!(report.outcome.battery, 100.0);

    let last = report.snapshots.last().expect("at least one snapshot");
    assert_eq!(last.state, "gameover");
    assert!(report.outcome.seconds < 120.0);
}

#[test]
fn snapshots_track_low_levels() {
    let mut config = GameConfig::new();
    config.tuning.scare_chance = 0.0;
    let report = run_headless(config, Some(3), 30.0, Policy::Dark);
    // 0.3 sanity per 0.1 s: heartbeat below 30 after roughly 23 s.
    assert!(report.snapshots.iter().any(|s| s.heartbeat));
    assert!(report.snapshots.iter().all(|s| !s.low_battery));
    let first = &report.snapshots[0];
    assert!(!first.heartbeat);
    assert!(!first.flashlight_on);
}
