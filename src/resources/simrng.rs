//! Seeded random source for the simulation.
//!
//! Projectile tumble is drawn from this resource so a run with the same seed
//! and the same inputs replays identically.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

#[derive(Resource, Debug, Clone)]
pub struct SimRng {
    pub rng: Rng,
    pub seed: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
            seed,
        }
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::new(42)
    }
}
