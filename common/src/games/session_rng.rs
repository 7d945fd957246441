use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integer generator the game state draws food positions from.
///
/// Hosts normally pass a [`SessionRng`]; tests substitute scripted sources to
/// pin food placement.
pub trait RandomSource {
    /// Returns a value uniformly distributed in `0..upper`. `upper` is never 0.
    fn next_index(&mut self, upper: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

impl RandomSource for SessionRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}
