//! Resource tick loop.
//!
//! Runs only while playing. Every `tick_ms` of world time the session gets a
//! [`SessionCmd::Tick`] (battery or sanity drain) followed by a roll for an
//! ambient message. A long frame runs the missed ticks back to back, and
//! the loop stops early once sanity is gone so game over fires once.

use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::messages::random_ambient_message;
use crate::resources::rng::GameRng;
use crate::resources::session::SessionCmd;
use crate::resources::ticker::TickClock;
use crate::resources::worldtime::WorldTime;
use crate::systems::session::SessionDriver;

pub fn resource_tick_system(
    time: Res<WorldTime>,
    mut clock: ResMut<TickClock>,
    mut rng: ResMut<GameRng>,
    mut driver: SessionDriver,
) {
    let period = driver.tuning().tick_secs();
    let ticks = clock.advance(time.delta, period);
    if ticks > 1 {
        debug!("catching up {} ticks", ticks);
    }
    for _ in 0..ticks {
        if driver.session().is_depleted() {
            break;
        }
        driver.send(SessionCmd::Tick);
        let p = driver.tuning().ambient_chance;
        if rng.chance(p) {
            let line = random_ambient_message(&mut rng.0);
            driver.send(SessionCmd::Say(line.to_string()));
        }
    }
}
