//! Fixed-period accumulator for the resource tick loop.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct TickClock {
    accumulator: f32,
}

impl TickClock {
    /// Add `dt` seconds and return how many whole `period`s elapsed.
    ///
    /// A long frame yields several ticks so the drain rate does not depend
    /// on the frame rate.
    pub fn advance(&mut self, dt: f32, period: f32) -> u32 {
        if period <= 0.0 {
            return 0;
        }
        self.accumulator += dt.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= period {
            self.accumulator -= period;
            ticks += 1;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tick_per_period_frame() {
        let mut c = TickClock::default();
        for _ in 0..10 {
            assert_eq!(c.advance(0.1, 0.1), 1);
        }
    }

    #[test]
    fn short_frames_accumulate() {
        let mut c = TickClock::default();
        assert_eq!(c.advance(0.05, 0.1), 0);
        assert_eq!(c.advance(0.05, 0.1), 1);
    }

    #[test]
    fn long_frame_catches_up() {
        let mut c = TickClock::default();
        assert_eq!(c.advance(1.0, 0.25), 4);
    }

    #[test]
    fn reset_drops_partial_period() {
        let mut c = TickClock::default();
        c.advance(0.09, 0.1);
        c.reset();
        assert_eq!(c.advance(0.09, 0.1), 0);
    }

    #[test]
    fn non_positive_period_never_ticks() {
        let mut c = TickClock::default();
        assert_eq!(c.advance(1.0, 0.0), 0);
    }
}
