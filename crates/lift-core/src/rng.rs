//! Run-level RNG wrapper.
//!
//! Generation is a single-threaded batch job, so one `SimRng` drives every
//! random draw of a run: demographic samples first, then the call pairs.
//!
//! - `SimRng::new(seed)` reproduces a run exactly (tests, `--seed`).
//! - `SimRng::from_entropy()` is the default: unseeded, different per process.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`dist.sample(rng.inner())`, etc.)
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
