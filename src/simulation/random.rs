use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// The single random source every draw in the simulation goes through.
#[derive(Resource, Deref, DerefMut)]
pub struct SimRng {
    seed: u64,
    #[deref]
    rng: ChaCha20Rng,
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        SimRng {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Uses `seed` when given, otherwise draws one from the thread generator so the run can
    /// still be replayed from the logged value.
    pub fn new(seed: Option<u64>) -> Self {
        Self::seeded(seed.unwrap_or_else(rand::random))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
