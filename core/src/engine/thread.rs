//! Engine event thread
//!
//! Completions come from the audio callback, kind switches from the UI. Both
//! mutate the same buffers and selector, so neither calls the engine directly:
//! they queue an [`EngineEvent`] and a single thread applies events in order.
//!
//! ```text
//! cpal callback ──CompletionSink──┐
//!                                 ├──(channel)──► engine thread ──► PlaybackEngine
//! UI / console ───EngineHandle────┘
//! ```

use std::io;
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::{EngineStatus, PlaybackEngine};
use crate::buffer::BufferId;
use crate::driver::PlaybackDriver;
use crate::generator::GeneratorKind;
use crate::preference::PreferenceStore;

/// Work item for the engine thread
#[derive(Debug)]
pub enum EngineEvent {
    /// The driver finished playing a buffer
    PlaybackCompleted(BufferId),
    /// Switch the active generator
    SelectKind(GeneratorKind),
    /// Run a refill pass without any state change
    Refill,
    /// Reply with the current status
    Status(SyncSender<EngineStatus>),
    /// Stop processing events
    Shutdown,
}

/// Cloneable sender used by drivers to report finished buffers.
///
/// The queue is unbounded: a completion is never dropped because UI commands
/// are backed up behind a slow preference save. Sending never blocks, so it
/// is safe to call from a real-time audio callback.
#[derive(Debug, Clone)]
pub struct CompletionSink {
    tx: Sender<EngineEvent>,
}

impl CompletionSink {
    pub fn new(tx: Sender<EngineEvent>) -> Self {
        Self { tx }
    }

    /// Report that `buffer` finished playing.
    ///
    /// Returns `false` once the engine thread has stopped.
    pub fn notify(&self, buffer: BufferId) -> bool {
        match self.tx.send(EngineEvent::PlaybackCompleted(buffer)) {
            Ok(()) => true,
            Err(_) => {
                debug!("Completion for buffer {} after engine shutdown", buffer);
                false
            }
        }
    }
}

/// Event channel waiting for an engine.
///
/// Created first so drivers can be given a [`CompletionSink`] before the
/// engine that owns them exists.
pub struct EngineThread {
    tx: Sender<EngineEvent>,
    rx: Receiver<EngineEvent>,
}

impl Default for EngineThread {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineThread {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn completion_sink(&self) -> CompletionSink {
        CompletionSink::new(self.tx.clone())
    }

    /// Move `engine` onto its own thread and start processing events.
    ///
    /// The thread runs one refill pass before handling any event, which
    /// starts playback for an active kind.
    pub fn spawn<D, S>(self, engine: PlaybackEngine<D, S>) -> io::Result<EngineHandle>
    where
        D: PlaybackDriver + Send + 'static,
        S: PreferenceStore + Send + 'static,
    {
        let Self { tx, rx } = self;
        let handle = thread::Builder::new()
            .name("noise-engine".into())
            .spawn(move || run(engine, rx))?;

        Ok(EngineHandle {
            tx: Some(tx),
            handle: Some(handle),
        })
    }
}

fn run<D: PlaybackDriver, S: PreferenceStore>(
    mut engine: PlaybackEngine<D, S>,
    rx: Receiver<EngineEvent>,
) {
    debug!("Engine thread started");
    engine.refill();

    for event in rx.iter() {
        match event {
            EngineEvent::PlaybackCompleted(buffer) => {
                engine.on_playback_completed(buffer);
            }
            EngineEvent::SelectKind(kind) => {
                engine.set_active_kind(kind);
            }
            EngineEvent::Refill => {
                engine.refill();
            }
            EngineEvent::Status(reply) => {
                let _ = reply.try_send(engine.status());
            }
            EngineEvent::Shutdown => break,
        }
    }

    debug!("Engine thread finished");
}

/// Handle to the running engine thread
///
/// Dropping the handle shuts the thread down and joins it.
pub struct EngineHandle {
    tx: Option<Sender<EngineEvent>>,
    handle: Option<JoinHandle<()>>,
}

impl EngineHandle {
    fn send(&self, event: EngineEvent) -> bool {
        let Some(ref tx) = self.tx else {
            return false;
        };
        match tx.send(event) {
            Ok(()) => true,
            Err(_) => {
                warn!("Engine thread disconnected");
                false
            }
        }
    }

    /// Switch the active generator
    pub fn select_kind(&self, kind: GeneratorKind) -> bool {
        self.send(EngineEvent::SelectKind(kind))
    }

    /// Ask for a refill pass
    pub fn request_refill(&self) -> bool {
        self.send(EngineEvent::Refill)
    }

    /// Sender for driver completions
    pub fn completion_sink(&self) -> Option<CompletionSink> {
        self.tx.as_ref().map(|tx| CompletionSink::new(tx.clone()))
    }

    /// Query the engine's status, waiting for the reply
    pub fn status(&self) -> Option<EngineStatus> {
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        if !self.send(EngineEvent::Status(reply_tx)) {
            return None;
        }
        reply_rx.recv().ok()
    }

    /// Check if the engine thread is still running
    pub fn is_alive(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        // Drivers hold their own senders, so closing ours is not enough to end
        // the event loop; it has to be told explicitly.
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(EngineEvent::Shutdown);
        }

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
