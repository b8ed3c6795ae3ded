//! Seedable random source shared by gameplay systems.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub Rng);

impl Default for GameRng {
    fn default() -> Self {
        GameRng(Rng::new())
    }
}

impl GameRng {
    /// Use a fixed seed when given, otherwise seed from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => GameRng(Rng::with_seed(seed)),
            None => GameRng::default(),
        }
    }

    /// Uniform float in `[0, 1)`.
    pub fn roll(&mut self) -> f32 {
        self.0.f32()
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.roll() < p
    }

    /// Uniform float in `[min, max)`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.roll() * (max - min)
    }
}
