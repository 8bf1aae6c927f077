//! Noise generators
//!
//! Each generator produces one sample per [`NoiseGenerator::get`] call and owns
//! its own PCG random stream. The engine keeps exactly one instance per
//! [`GeneratorKind`] in a [`GeneratorBank`] for its whole lifetime, so brown
//! noise keeps its accumulator across kind switches.

mod brown;
mod kind;
mod silent;
mod white;

use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::format::Sample;

pub use brown::{BROWN_DECAY, BROWN_STEP_STD_DEV, BrownNoiseGenerator};
pub use kind::{GeneratorKind, ParseKindError};
pub use silent::SilentGenerator;
pub use white::{WHITE_STD_DEV, WhiteNoiseGenerator};

/// Per-sample noise source.
///
/// `get` runs inside the refill path, so implementations must not block,
/// allocate or perform I/O.
pub trait NoiseGenerator: Send {
    /// Produce the next sample.
    fn get(&mut self) -> Sample;

    /// Whether this generator means "produce nothing".
    ///
    /// A silent generator suspends refills entirely instead of writing zeros.
    fn is_silent(&self) -> bool {
        false
    }

    /// Overwrite every position of `out` with fresh samples.
    fn fill(&mut self, out: &mut [Sample]) {
        for sample in out.iter_mut() {
            *sample = self.get();
        }
    }
}

/// Salt mixed into the brown generator's seed so both kinds never share a stream.
const BROWN_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Build a PCG stream from an explicit seed, or from the thread RNG if `None`.
pub(crate) fn seeded_rng(seed: Option<u64>) -> Pcg64 {
    Pcg64::seed_from_u64(seed.unwrap_or_else(rand::random::<u64>))
}

/// One generator per kind, created together and never replaced.
pub struct GeneratorBank {
    silent: SilentGenerator,
    white: WhiteNoiseGenerator,
    brown: BrownNoiseGenerator,
}

impl GeneratorBank {
    /// Create the bank.
    ///
    /// With `Some(seed)` both noise streams are reproducible; the brown stream
    /// is derived from a salted copy of the seed.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            silent: SilentGenerator,
            white: WhiteNoiseGenerator::new(seeded_rng(seed)),
            brown: BrownNoiseGenerator::new(seeded_rng(seed.map(|s| s ^ BROWN_SEED_SALT))),
        }
    }

    /// Generator for `kind`
    pub fn get_mut(&mut self, kind: GeneratorKind) -> &mut dyn NoiseGenerator {
        match kind {
            GeneratorKind::None => &mut self.silent,
            GeneratorKind::White => &mut self.white,
            GeneratorKind::Brown => &mut self.brown,
        }
    }

    /// The brown generator, for inspecting its accumulator
    pub fn brown(&self) -> &BrownNoiseGenerator {
        &self.brown
    }
}
