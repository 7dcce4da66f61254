use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform values in `[0, 1)`. Tests substitute a
/// scripted sequence where exact step choices matter.
pub trait UniformRandom {
    fn next_unit(&mut self) -> f64;
}

/// Reseedable uniform `[0, 1)` source backed by [`rand::rngs::StdRng`].
#[derive(Clone, Debug)]
pub struct UniformSource {
    rng: StdRng,
}

impl UniformSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl UniformRandom for UniformSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random()
    }
}
