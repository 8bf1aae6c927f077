//! Noisegen - continuous white/brown noise player
//!
//! Connects the engine from `noisegen-core` to the outside world:
//!
//! - [`output`] - cpal stream fed from the engine's submitted buffers
//! - [`render`] - the same engine writing a WAV file instead of playing
//! - [`console`] - stdin commands for switching generators

pub mod console;
pub mod output;
pub mod render;
