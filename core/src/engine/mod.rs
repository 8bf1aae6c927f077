//! Playback engine: the refill scheduler
//!
//! [`PlaybackEngine`] owns the buffer set, one generator per kind, the active
//! kind and the driver. Every trigger funnels into [`PlaybackEngine::refill`]:
//!
//! ```text
//! startup ─────────────────┐
//! set_active_kind ─────────┼──► refill ──► fill free buffer ──► driver.submit
//! on_playback_completed ───┘       ▲                                │
//!                                  └──────── completion ◄───────────┘
//! ```
//!
//! The engine itself is single-threaded; [`EngineThread`] serializes events
//! arriving from the audio callback and the UI.

mod thread;


use tracing::{debug, info, trace, warn};

use crate::buffer::{BufferId, BufferSet};
use crate::driver::PlaybackDriver;
use crate::format::{BUFFER_SAMPLES, buffer_duration_ms};
use crate::generator::{GeneratorBank, GeneratorKind};
use crate::preference::PreferenceStore;
use crate::selector::GeneratorSelector;

pub use thread::{CompletionSink, EngineEvent, EngineHandle, EngineThread};

/// Engine construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Samples per buffer
    pub buffer_samples: usize,
    /// Seed for both generators; `None` seeds from the thread RNG
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buffer_samples: BUFFER_SAMPLES,
            seed: None,
        }
    }
}

/// Point-in-time view of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus {
    pub kind: GeneratorKind,
    /// Buffers handed to the driver and not yet completed
    pub in_flight: usize,
    /// Buffer the next refill inspects
    pub current: BufferId,
    /// Successful submits since construction
    pub submitted_total: u64,
}

/// Double-buffered noise playback state
pub struct PlaybackEngine<D, S> {
    buffers: BufferSet,
    generators: GeneratorBank,
    selector: GeneratorSelector,
    driver: D,
    store: S,
    submitted_total: u64,
}

impl<D: PlaybackDriver, S: PreferenceStore> PlaybackEngine<D, S> {
    /// Create the engine with the kind loaded from `store`.
    ///
    /// Nothing is submitted until the first [`refill`](Self::refill).
    pub fn new(config: EngineConfig, driver: D, store: S) -> Self {
        let kind = store.load();
        let buffers = BufferSet::new(config.buffer_samples);
        info!(
            "Noise engine ready: {} generator, 2 x {} samples ({:.1}ms each)",
            kind,
            buffers.buffer_len(),
            buffer_duration_ms(buffers.buffer_len())
        );
        Self {
            buffers,
            generators: GeneratorBank::new(config.seed),
            selector: GeneratorSelector::new(kind),
            driver,
            store,
            submitted_total: 0,
        }
    }

    pub fn active_kind(&self) -> GeneratorKind {
        self.selector.active()
    }

    /// Select the active generator, persist it, and refill immediately.
    ///
    /// Returns the number of buffers submitted by the refill. Buffers already
    /// in flight keep the samples of the previous kind.
    pub fn set_active_kind(&mut self, kind: GeneratorKind) -> usize {
        let previous = self.selector.select(kind);
        if previous != kind {
            info!("Generator switched: {} -> {}", previous, kind);
        }
        if let Err(e) = self.store.save(kind) {
            warn!("Failed to save generator preference: {}", e);
        }
        self.refill()
    }

    /// The driver finished playing `buffer`; mark it free and refill.
    ///
    /// Returns the number of buffers submitted by the refill.
    pub fn on_playback_completed(&mut self, buffer: BufferId) -> usize {
        if !self.buffers.mark_free(buffer) {
            warn!("Completion for buffer {} which was not in flight", buffer);
        }
        trace!("Buffer {} completed", buffer);
        self.refill()
    }

    /// Refill and submit every free buffer, starting at the current one.
    ///
    /// Does nothing while the silent generator is active. Stops at the first
    /// buffer that is in flight, or at the first failed submit, so at most two
    /// buffers are submitted per call. Returns the number submitted.
    pub fn refill(&mut self) -> usize {
        let generator = self.generators.get_mut(self.selector.active());
        if generator.is_silent() {
            trace!("Refill skipped: silent generator active");
            return 0;
        }

        let mut submitted = 0;
        loop {
            let id = self.buffers.current();
            let buffer = self.buffers.get_mut(id);
            if !buffer.is_free() {
                break;
            }

            generator.fill(buffer.samples_mut());
            if let Err(e) = self.driver.submit(id, buffer.samples()) {
                warn!("Submit of buffer {} failed, will retry: {}", id, e);
                break;
            }

            self.buffers.mark_submitted();
            self.submitted_total += 1;
            submitted += 1;
            debug!("Buffer {} submitted", id);
        }
        submitted
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            kind: self.selector.active(),
            in_flight: self.buffers.in_flight(),
            current: self.buffers.current(),
            submitted_total: self.submitted_total,
        }
    }

    pub fn buffers(&self) -> &BufferSet {
        &self.buffers
    }

    pub fn generators(&self) -> &GeneratorBank {
        &self.generators
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tear down the engine, returning its driver
    pub fn into_driver(self) -> D {
        self.driver
    }
}
