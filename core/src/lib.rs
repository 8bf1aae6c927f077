//! Noisegen Core - noise synthesis and double-buffered playback scheduling
//!
//! This crate contains everything that decides *what* gets played and *when*
//! a buffer is handed to the audio device. The device itself sits behind the
//! [`PlaybackDriver`] trait so the engine can be driven by cpal, a WAV writer,
//! or a test double.
//!
//! # Architecture
//!
//! - [`NoiseGenerator`] - Per-sample noise source (white, brown, silent)
//! - [`BufferSet`] - Two fixed-size buffers alternated round-robin
//! - [`PlaybackEngine`] - Owns buffers, generators and the active kind; runs refills
//! - [`EngineThread`] - Serializes completion and kind-switch events onto one thread
//! - [`PreferenceStore`] - Persists the selected [`GeneratorKind`]

pub mod buffer;
pub mod config;
pub mod driver;
pub mod engine;
pub mod format;
pub mod generator;
pub mod preference;
pub mod selector;
#[cfg(test)]
pub mod test_utils;

pub use buffer::{BUFFER_COUNT, Buffer, BufferId, BufferSet, BufferState};
pub use config::{Config, ConfigError, EngineSettings, NoiseConfig};
pub use driver::{PlaybackDriver, SubmitError};
pub use engine::{
    CompletionSink, EngineConfig, EngineEvent, EngineHandle, EngineStatus, EngineThread,
    PlaybackEngine,
};
pub use format::{BUFFER_SAMPLES, CHANNELS, SAMPLE_RATE, Sample};
pub use generator::{
    BrownNoiseGenerator, GeneratorBank, GeneratorKind, NoiseGenerator, ParseKindError,
    SilentGenerator, WhiteNoiseGenerator,
};
pub use preference::{MemoryPreferenceStore, PreferenceStore, TomlPreferenceStore};
pub use selector::GeneratorSelector;
