use super::NoiseGenerator;
use crate::format::Sample;

/// Generator for [`GeneratorKind::None`](super::GeneratorKind::None).
///
/// The engine never fills buffers from it: while it is active, refills are
/// skipped and free buffers stay free.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentGenerator;

impl NoiseGenerator for SilentGenerator {
    fn get(&mut self) -> Sample {
        0
    }

    fn is_silent(&self) -> bool {
        true
    }
}
