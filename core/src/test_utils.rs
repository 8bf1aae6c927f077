//! Test doubles shared by unit tests

use crate::buffer::BufferId;
use crate::driver::{PlaybackDriver, SubmitError};
use crate::engine::{EngineConfig, PlaybackEngine};
use crate::format::Sample;
use crate::preference::MemoryPreferenceStore;

/// One captured `submit` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub buffer: BufferId,
    pub samples: Vec<Sample>,
}

/// Driver that records every accepted submit and can reject some on demand
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub submissions: Vec<Submission>,
    fail_next: usize,
    pub rejected: usize,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the next `count` submits
    pub fn fail_next(&mut self, count: usize) {
        self.fail_next = count;
    }

    /// Buffer ids in submission order
    pub fn submitted_ids(&self) -> Vec<BufferId> {
        self.submissions.iter().map(|s| s.buffer).collect()
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }
}

impl PlaybackDriver for RecordingDriver {
    fn submit(&mut self, buffer: BufferId, samples: &[Sample]) -> Result<(), SubmitError> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            self.rejected += 1;
            return Err(SubmitError::Sink("injected failure".into()));
        }
        self.submissions.push(Submission {
            buffer,
            samples: samples.to_vec(),
        });
        Ok(())
    }
}

/// Seeded engine over a [`RecordingDriver`] with `stored` as the persisted kind value
pub fn test_engine(
    stored: u32,
    buffer_samples: usize,
) -> PlaybackEngine<RecordingDriver, MemoryPreferenceStore> {
    PlaybackEngine::new(
        EngineConfig {
            buffer_samples,
            seed: Some(0x5EED),
        },
        RecordingDriver::new(),
        MemoryPreferenceStore::with_stored(stored),
    )
}
