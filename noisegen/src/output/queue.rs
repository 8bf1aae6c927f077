//! Submit/complete bridge between the engine and the cpal callback
//!
//! ```text
//! engine thread                         cpal thread
//!     │                                     │
//! [CpalDriver::submit]                      │
//!     ├─samples──(HeapRb<i16>)────────►[PlaybackCursor::render]
//!     └─(id,len)─(HeapRb<Queued>)─────►     │ buffer fully played
//!                                           └──► CompletionSink::notify(id)
//! ```
//!
//! Samples are pushed before the buffer's id, so once the callback sees an id
//! all of that buffer's samples are already queued.

use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

use noisegen_core::{BUFFER_COUNT, BufferId, CompletionSink, PlaybackDriver, Sample, SubmitError};

/// A submitted buffer as seen by the callback
#[derive(Debug, Clone, Copy)]
struct Queued {
    id: BufferId,
    len: usize,
}

/// Build the driver/cursor pair for buffers of `buffer_samples`.
///
/// The sample ring holds exactly [`BUFFER_COUNT`] buffers, which is the most
/// the engine ever has in flight.
pub fn playback_queue(
    buffer_samples: usize,
    completions: CompletionSink,
) -> (CpalDriver, PlaybackCursor) {
    let (samples_tx, samples_rx) = HeapRb::<Sample>::new(buffer_samples * BUFFER_COUNT).split();
    let (queued_tx, queued_rx) = HeapRb::<Queued>::new(BUFFER_COUNT).split();

    let driver = CpalDriver {
        samples: samples_tx,
        queued: queued_tx,
    };
    let cursor = PlaybackCursor {
        samples: samples_rx,
        queued: queued_rx,
        current: None,
        completions,
    };
    (driver, cursor)
}

/// Engine-side half: queues submitted buffers for the callback
pub struct CpalDriver {
    samples: HeapProd<Sample>,
    queued: HeapProd<Queued>,
}

impl PlaybackDriver for CpalDriver {
    fn submit(&mut self, buffer: BufferId, samples: &[Sample]) -> Result<(), SubmitError> {
        let vacant = self.samples.vacant_len();
        if self.queued.is_full() || vacant < samples.len() {
            return Err(SubmitError::QueueFull {
                buffer,
                vacant,
                needed: samples.len(),
            });
        }

        let pushed = self.samples.push_slice(samples);
        debug_assert_eq!(pushed, samples.len());
        self.queued
            .try_push(Queued {
                id: buffer,
                len: pushed,
            })
            .map_err(|_| SubmitError::Sink("buffer queue full".into()))
    }
}

/// Callback-side half: plays queued buffers and reports each one as it ends
pub struct PlaybackCursor {
    samples: HeapCons<Sample>,
    queued: HeapCons<Queued>,
    /// Buffer being played and samples left in it
    current: Option<(BufferId, usize)>,
    completions: CompletionSink,
}

impl PlaybackCursor {
    /// Fill `out` from the queued buffers, padding with silence on underrun.
    ///
    /// Sends one completion per buffer, the moment its last sample is copied.
    pub fn render(&mut self, out: &mut [Sample]) {
        let mut written = 0;
        while written < out.len() {
            let (id, remaining) = match self.current {
                Some(playing) => playing,
                None => match self.queued.try_pop() {
                    Some(next) => (next.id, next.len),
                    None => break,
                },
            };

            let want = remaining.min(out.len() - written);
            let popped = self.samples.pop_slice(&mut out[written..written + want]);
            written += popped;

            let left = remaining - popped;
            if left == 0 {
                self.current = None;
                self.completions.notify(id);
            } else {
                self.current = Some((id, left));
                if popped < want {
                    break;
                }
            }
        }

        out[written..].fill(0);
    }

    /// Whether a buffer is partially played
    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }
}
