//! Seeded Gaussian range noise
//!
//! One generator per simulator; the seed is kept so a run can be replayed.

use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_pcg::Pcg32;

/// Zero-mean Gaussian noise source
#[derive(Debug, Clone)]
pub struct RangeNoise {
    rng: Pcg32,
    seed: u64,
    std_dev: f64,
}

impl RangeNoise {
    pub fn new(std_dev: f64, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            std_dev,
        }
    }

    /// Seeded from system entropy; the drawn seed is still reported
    pub fn from_entropy(std_dev: f64) -> Self {
        Self::new(std_dev, rand::random::<u64>())
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Noise disabled when the standard deviation is zero
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.std_dev > 0.0
    }

    /// Restart the sequence from a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
        self.seed = seed;
    }

    /// One sample; 0 without touching the generator when disabled
    #[inline]
    pub fn sample(&mut self) -> f64 {
        if !self.is_enabled() {
            return 0.0;
        }
        let n: f64 = self.rng.sample(StandardNormal);
        n * self.std_dev
    }
}
