//! Playback driver seam
//!
//! The engine only ever calls [`PlaybackDriver::submit`]. Completions travel
//! the other way, from the device back into
//! [`PlaybackEngine::on_playback_completed`](crate::PlaybackEngine::on_playback_completed),
//! usually through a [`CompletionSink`](crate::CompletionSink).

use crate::buffer::BufferId;
use crate::format::Sample;

/// Accepts filled buffers for playback.
///
/// Contract:
/// - `submit` is only called for buffers that are not in flight
/// - every successful submit is followed by exactly one completion for that
///   buffer, in submission order
/// - `submit` must not block
pub trait PlaybackDriver {
    fn submit(&mut self, buffer: BufferId, samples: &[Sample]) -> Result<(), SubmitError>;
}

/// A single buffer could not be queued.
///
/// Not fatal: the buffer stays free and the next refill retries it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The driver's queue cannot take the whole buffer right now
    #[error("buffer {buffer} rejected: {vacant} of {needed} samples free in output queue")]
    QueueFull {
        buffer: BufferId,
        vacant: usize,
        needed: usize,
    },

    /// The sink behind the driver failed
    #[error("output sink error: {0}")]
    Sink(String),
}

impl<D: PlaybackDriver + ?Sized> PlaybackDriver for Box<D> {
    fn submit(&mut self, buffer: BufferId, samples: &[Sample]) -> Result<(), SubmitError> {
        (**self).submit(buffer, samples)
    }
}
