//! Brown noise: a leaky integrator over Gaussian increments

use rand::Rng;
use rand_distr::StandardNormal;
use rand_pcg::Pcg64;

use super::{NoiseGenerator, seeded_rng};
use crate::format::{Sample, to_sample};

/// Standard deviation of each random-walk increment
pub const BROWN_STEP_STD_DEV: f64 = 100.0;

/// Per-sample decay applied to the accumulator, bounding its variance
pub const BROWN_DECAY: f64 = 0.98;

/// Damped random walk.
///
/// Each call computes `current = BROWN_DECAY * (current + increment)` and
/// returns the decayed value. The stationary standard deviation is roughly
/// 490, so output stays well inside the `i16` range.
pub struct BrownNoiseGenerator {
    rng: Pcg64,
    current: f64,
}

impl BrownNoiseGenerator {
    pub fn new(rng: Pcg64) -> Self {
        Self { rng, current: 0.0 }
    }

    /// Reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seeded_rng(Some(seed)))
    }

    /// Accumulator value after the last `get`
    pub fn current(&self) -> f64 {
        self.current
    }
}

impl Default for BrownNoiseGenerator {
    fn default() -> Self {
        Self::new(seeded_rng(None))
    }
}

impl NoiseGenerator for BrownNoiseGenerator {
    #[inline]
    fn get(&mut self) -> Sample {
        let z: f64 = self.rng.sample(StandardNormal);
        self.current += z * BROWN_STEP_STD_DEV;
        self.current *= BROWN_DECAY;
        to_sample(self.current)
    }
}
