//! Play session state.
//!
//! [`Session`] is the one place where sanity, battery, flashlight, messages,
//! scare flash and ghost visibility live. Nothing writes those fields
//! directly: every change is a [`SessionCmd`] passed to [`Session::apply`],
//! which returns the [`SessionOutcome`]s the caller must react to (schedule
//! an expiry timer, restart the scare window, request game over).
//!
//! `apply` is deterministic. Randomness (ambient rolls, ghost positions,
//! scare chance) is drawn by the systems that produce commands.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector3;
use serde::Serialize;
use smallvec::SmallVec;

use crate::resources::gameconfig::Tuning;
use crate::resources::gamestate::GameStates;
use crate::resources::messages::{FLASHLIGHT_DIED_MESSAGE, MessageQueue};

pub const MAX_LEVEL: f32 = 100.0;
/// Below this the sanity bar is drawn in its "low" style.
pub const LOW_SANITY: f32 = 25.0;
/// Below this the battery bar is drawn in its "low" style.
pub const LOW_BATTERY: f32 = 20.0;
/// Below this the HUD pulses like a heartbeat.
pub const HEARTBEAT_SANITY: f32 = 30.0;

/// Per-session constants copied out of [`Tuning`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionTuning {
    pub battery_drain: f32,
    pub sanity_drain: f32,
    pub scare_damage: f32,
}

impl From<&Tuning> for SessionTuning {
    fn from(t: &Tuning) -> Self {
        Self {
            battery_drain: t.battery_drain,
            sanity_drain: t.sanity_drain,
            scare_damage: t.scare_damage,
        }
    }
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self::from(&Tuning::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostState {
    pub visible: bool,
    pub position: Vector3,
}

impl Default for GhostState {
    fn default() -> Self {
        Self {
            visible: false,
            position: Vector3 {
                x: 0.0,
                y: 1.5,
                z: -15.0,
            },
        }
    }
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCmd {
    /// Reset every field and show `intro`.
    Begin { intro: String },
    /// One step of the resource loop.
    Tick,
    ToggleFlashlight,
    Scare,
    /// End the flash started by the scare of this generation. Ignored when
    /// a later scare has restarted the window.
    EndScare(u32),
    ShowGhost(Vector3),
    HideGhost,
    /// Enqueue a message.
    Say(String),
    /// Remove the first message equal to the payload.
    Expire(String),
}

/// Side effects the caller of [`Session::apply`] is responsible for.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// A message was enqueued and needs an expiry timer.
    MessageAdded(String),
    /// The scare flash of this generation started (or was re-triggered).
    ScareStarted(u32),
    /// The battery just ran out and the flashlight switched off.
    FlashlightDied,
    /// Sanity just reached zero.
    SanityDepleted,
}

pub type Outcomes = SmallVec<[SessionOutcome; 2]>;

#[derive(Resource, Debug, Clone)]
pub struct Session {
    sanity: f32,
    battery: f32,
    flashlight_on: bool,
    scare_active: bool,
    /// Bumped on every scare; never reset, so stale end timers cannot match.
    scare_gen: u32,
    ghost: GhostState,
    messages: MessageQueue,
    ticks: u64,
    tuning: SessionTuning,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionTuning::default())
    }
}

impl Session {
    pub fn new(tuning: SessionTuning) -> Self {
        Session {
            sanity: MAX_LEVEL,
            battery: MAX_LEVEL,
            flashlight_on: true,
            scare_active: false,
            scare_gen: 0,
            ghost: GhostState::default(),
            messages: MessageQueue::new(),
            ticks: 0,
            tuning,
        }
    }

    pub fn sanity(&self) -> f32 {
        self.sanity
    }

    pub fn battery(&self) -> f32 {
        self.battery
    }

    pub fn flashlight_on(&self) -> bool {
        self.flashlight_on
    }

    /// Whether the flashlight actually emits light.
    pub fn flashlight_lit(&self) -> bool {
        self.flashlight_on && self.battery > 0.0
    }

    pub fn scare_active(&self) -> bool {
        self.scare_active
    }

    pub fn ghost(&self) -> &GhostState {
        &self.ghost
    }

    pub fn messages(&self) -> &MessageQueue {
        &self.messages
    }

    /// Ticks applied since the last [`SessionCmd::Begin`].
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_depleted(&self) -> bool {
        self.sanity <= 0.0
    }

    /// Generation of the most recent scare.
    pub fn scare_gen(&self) -> u32 {
        self.scare_gen
    }

    /// Replace the per-session constants. Takes effect immediately.
    pub fn set_tuning(&mut self, tuning: SessionTuning) {
        self.tuning = tuning;
    }

    /// Apply one command. This is the only way session state changes.
    pub fn apply(&mut self, cmd: SessionCmd) -> Outcomes {
        let mut out = Outcomes::new();
        match cmd {
            SessionCmd::Begin { intro } => {
                self.sanity = MAX_LEVEL;
                self.battery = MAX_LEVEL;
                self.flashlight_on = true;
                self.scare_active = false;
                self.ghost.visible = false;
                self.messages.clear();
                self.ticks = 0;
                self.say(intro, &mut out);
            }
            SessionCmd::Tick => {
                self.ticks += 1;
                if self.flashlight_on {
                    let before = self.battery;
                    self.battery = clamp_level(self.battery - self.tuning.battery_drain);
                    if before > 0.0 && self.battery == 0.0 {
                        self.flashlight_on = false;
                        out.push(SessionOutcome::FlashlightDied);
                        self.say(FLASHLIGHT_DIED_MESSAGE.to_string(), &mut out);
                    }
                } else {
                    self.drain_sanity(self.tuning.sanity_drain, &mut out);
                }
            }
            SessionCmd::ToggleFlashlight => {
                if self.battery > 0.0 {
                    self.flashlight_on = !self.flashlight_on;
                }
            }
            SessionCmd::Scare => {
                self.scare_active = true;
                self.scare_gen = self.scare_gen.wrapping_add(1);
                out.push(SessionOutcome::ScareStarted(self.scare_gen));
                self.drain_sanity(self.tuning.scare_damage, &mut out);
            }
            SessionCmd::EndScare(generation) => {
                if generation == self.scare_gen {
                    self.scare_active = false;
                }
            }
            SessionCmd::ShowGhost(position) => {
                self.ghost.visible = true;
                self.ghost.position = position;
            }
            SessionCmd::HideGhost => self.ghost.visible = false,
            SessionCmd::Say(msg) => self.say(msg, &mut out),
            SessionCmd::Expire(msg) => {
                self.messages.remove_first(&msg);
            }
        }
        out
    }

    fn say(&mut self, msg: String, out: &mut Outcomes) {
        self.messages.push(msg.clone());
        out.push(SessionOutcome::MessageAdded(msg));
    }

    fn drain_sanity(&mut self, amount: f32, out: &mut Outcomes) {
        let before = self.sanity;
        self.sanity = clamp_level(self.sanity - amount);
        if before > 0.0 && self.sanity <= 0.0 {
            out.push(SessionOutcome::SanityDepleted);
        }
    }

    /// Read-only copy for presentation and reporting.
    pub fn snapshot(&self, state: &GameStates, elapsed: f32) -> SessionSnapshot {
        SessionSnapshot {
            state: state.label(),
            elapsed,
            ticks: self.ticks,
            sanity: self.sanity,
            battery: self.battery,
            flashlight_on: self.flashlight_on,
            scare_active: self.scare_active,
            ghost_visible: self.ghost.visible,
            ghost_position: [
                self.ghost.position.x,
                self.ghost.position.y,
                self.ghost.position.z,
            ],
            messages: self.messages.clone(),
            low_sanity: self.sanity < LOW_SANITY,
            low_battery: self.battery < LOW_BATTERY,
            heartbeat: self.sanity < HEARTBEAT_SANITY,
        }
    }
}

fn clamp_level(value: f32) -> f32 {
    value.clamp(0.0, MAX_LEVEL)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: &'static str,
    pub elapsed: f32,
    pub ticks: u64,
    pub sanity: f32,
    pub battery: f32,
    pub flashlight_on: bool,
    pub scare_active: bool,
    pub ghost_visible: bool,
    pub ghost_position: [f32; 3],
    pub messages: MessageQueue,
    pub low_sanity: bool,
    pub low_battery: bool,
    pub heartbeat: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::messages::INTRO_MESSAGE;

    fn begun() -> Session {
        let mut s = Session::default();
        s.apply(SessionCmd::Begin {
            intro: INTRO_MESSAGE.to_string(),
        });
        s
    }

    #[test]
    fn begin_resets_and_seeds_one_intro_message() {
        let mut s = Session::default();
        s.apply(SessionCmd::Say("old".into()));
        s.apply(SessionCmd::ToggleFlashlight);
        s.apply(SessionCmd::Tick);
        let out = s.apply(SessionCmd::Begin {
            intro: INTRO_MESSAGE.to_string(),
        });
        assert_eq!(s.sanity(), 100.0);
        assert_eq!(s.battery(), 100.0);
        assert!(s.flashlight_on());
        assert_eq!(s.messages().iter().collect::<Vec<_>>(), vec![INTRO_MESSAGE]);
        assert_eq!(
            out.as_slice(),
            &[SessionOutcome::MessageAdded(INTRO_MESSAGE.to_string())]
        );
    }

    #[test]
    fn flashlight_on_drains_only_battery() {
        let mut s = begun();
        s.apply(SessionCmd::Tick);
        assert_eq!(s.battery(), 99.5);
        assert_eq!(s.sanity(), 100.0);
    }

    #[test]
    fn darkness_drains_only_sanity() {
        let mut s = begun();
        s.apply(SessionCmd::ToggleFlashlight);
        s.apply(SessionCmd::Tick);
        assert_eq!(s.battery(), 100.0);
        assert!((s.sanity() - 99.7).abs() < 1e-4);
    }

    #[test]
    fn battery_runs_out_after_two_hundred_ticks() {
        let mut s = begun();
        let mut died_at = None;
        for tick in 1..=200 {
            let out = s.apply(SessionCmd::Tick);
            if out.contains(&SessionOutcome::FlashlightDied) {
                assert!(died_at.is_none(), "flashlight died twice");
                died_at = Some(tick);
                assert!(s.messages().contains(FLASHLIGHT_DIED_MESSAGE));
                assert!(!s.flashlight_on());
            }
            assert!((0.0..=100.0).contains(&s.battery()));
            assert_eq!(s.sanity(), 100.0);
        }
        assert_eq!(died_at, Some(200));
        assert_eq!(s.battery(), 0.0);
        assert!(!s.flashlight_on());

        // Darkness starts on the next tick.
        s.apply(SessionCmd::Tick);
        assert!(s.sanity() < 100.0);
    }

    #[test]
    fn toggle_is_noop_with_empty_battery() {
        let mut s = begun();
        for _ in 0..200 {
            s.apply(SessionCmd::Tick);
        }
        assert!(!s.flashlight_on());
        s.apply(SessionCmd::ToggleFlashlight);
        assert!(!s.flashlight_on());
        assert!(!s.flashlight_lit());
    }

    #[test]
    fn toggle_flips_while_battery_remains() {
        let mut s = begun();
        s.apply(SessionCmd::ToggleFlashlight);
        assert!(!s.flashlight_on());
        s.apply(SessionCmd::ToggleFlashlight);
        assert!(s.flashlight_on());
    }

    #[test]
    fn darkness_depletes_sanity_at_tick_334_exactly_once() {
        let mut s = begun();
        s.apply(SessionCmd::ToggleFlashlight);
        let mut depleted = Vec::new();
        for tick in 1..=340 {
            let out = s.apply(SessionCmd::Tick);
            if out.contains(&SessionOutcome::SanityDepleted) {
                depleted.push(tick);
            }
            assert!((0.0..=100.0).contains(&s.sanity()));
            if tick == 333 {
                assert!(s.sanity() > 0.0);
            }
        }
        assert_eq!(depleted, vec![334]);
        assert_eq!(s.sanity(), 0.0);
    }

    #[test]
    fn scare_costs_fifteen_and_clamps() {
        let mut s = begun();
        let out = s.apply(SessionCmd::Scare);
        assert!(s.scare_active());
        assert_eq!(s.sanity(), 85.0);
        assert_eq!(out.as_slice(), &[SessionOutcome::ScareStarted(1)]);

        for _ in 0..5 {
            s.apply(SessionCmd::Scare);
        }
        assert_eq!(s.sanity(), 10.0);
        let out = s.apply(SessionCmd::Scare);
        assert_eq!(s.sanity(), 0.0);
        assert!(out.contains(&SessionOutcome::SanityDepleted));

        let out = s.apply(SessionCmd::Scare);
        assert!(!out.contains(&SessionOutcome::SanityDepleted));

        s.apply(SessionCmd::EndScare(s.scare_gen()));
        assert!(!s.scare_active());
    }

    #[test]
    fn end_of_an_earlier_scare_keeps_the_flash() {
        let mut s = begun();
        s.apply(SessionCmd::Scare);
        let first = s.scare_gen();
        s.apply(SessionCmd::Scare);
        assert_eq!(s.scare_gen(), first + 1);

        s.apply(SessionCmd::EndScare(first));
        assert!(s.scare_active());
        s.apply(SessionCmd::EndScare(first + 1));
        assert!(!s.scare_active());
    }

    #[test]
    fn ghost_show_and_hide() {
        let mut s = begun();
        let pos = Vector3 {
            x: 1.0,
            y: 1.5,
            z: -12.0,
        };
        s.apply(SessionCmd::ShowGhost(pos));
        assert!(s.ghost().visible);
        assert_eq!(s.ghost().position, pos);
        s.apply(SessionCmd::HideGhost);
        assert!(!s.ghost().visible);
    }

    #[test]
    fn expire_removes_by_value() {
        let mut s = begun();
        s.apply(SessionCmd::Say("a".into()));
        s.apply(SessionCmd::Expire(INTRO_MESSAGE.to_string()));
        assert_eq!(s.messages().iter().collect::<Vec<_>>(), vec!["a"]);
        s.apply(SessionCmd::Expire("not there".into()));
        assert_eq!(s.messages().len(), 1);
    }

    #[test]
    fn snapshot_reports_low_states() {
        let mut s = begun();
        s.apply(SessionCmd::ToggleFlashlight);
        for _ in 0..260 {
            s.apply(SessionCmd::Tick);
        }
        let snap = s.snapshot(&GameStates::Playing, 26.0);
        assert_eq!(snap.state, "playing");
        assert!(snap.low_sanity);
        assert!(snap.heartbeat);
        assert!(!snap.low_battery);
        assert_eq!(snap.ticks, 260);
    }
}
