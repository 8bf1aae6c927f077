//! White noise: independent Gaussian samples

use rand::Rng;
use rand_distr::StandardNormal;
use rand_pcg::Pcg64;

use super::{NoiseGenerator, seeded_rng};
use crate::format::{Sample, to_sample};

/// Standard deviation of white noise samples.
///
/// Keeps output well inside the `i16` range without clamping.
pub const WHITE_STD_DEV: f64 = 400.0;

/// Stateless white noise: every sample is an independent N(0, 400) draw.
pub struct WhiteNoiseGenerator {
    rng: Pcg64,
}

impl WhiteNoiseGenerator {
    pub fn new(rng: Pcg64) -> Self {
        Self { rng }
    }

    /// Reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seeded_rng(Some(seed)))
    }
}

impl Default for WhiteNoiseGenerator {
    fn default() -> Self {
        Self::new(seeded_rng(None))
    }
}

impl NoiseGenerator for WhiteNoiseGenerator {
    #[inline]
    fn get(&mut self) -> Sample {
        let z: f64 = self.rng.sample(StandardNormal);
        to_sample(z * WHITE_STD_DEV)
    }
}
