//! Fixed output format
//!
//! The device format is a constant, never negotiated:
//! - 44,100 Hz sample rate
//! - Mono
//! - 16-bit signed PCM

/// One PCM sample
pub type Sample = i16;

/// Output sample rate in Hz
pub const SAMPLE_RATE: u32 = 44_100;

/// Output channel count
pub const CHANNELS: u16 = 1;

/// Default samples per buffer (~93ms at 44.1kHz)
pub const BUFFER_SAMPLES: usize = 4 * 1024;

/// Convert a generated value to a sample.
///
/// Truncates toward zero. Values beyond the `i16` range saturate at the
/// bounds instead of wrapping, and NaN maps to 0.
#[inline]
pub fn to_sample(value: f64) -> Sample {
    value as Sample
}

/// Playback duration of `samples` mono samples, in milliseconds.
pub fn buffer_duration_ms(samples: usize) -> f64 {
    samples as f64 * 1000.0 / SAMPLE_RATE as f64
}
