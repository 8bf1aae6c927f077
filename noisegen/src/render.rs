//! Offline rendering to WAV
//!
//! Drives the same [`PlaybackEngine`] used for live playback, but with a
//! driver that writes each submitted buffer to a WAV file and "completes" it
//! immediately. Completions are fed back in submission order, so the file
//! contains exactly what the device would have played.

use std::collections::VecDeque;
use std::io::{Seek, Write};
use std::path::Path;

use tracing::{debug, info};

use noisegen_core::{
    BufferId, CHANNELS, EngineConfig, GeneratorKind, MemoryPreferenceStore, PlaybackDriver,
    PlaybackEngine, SAMPLE_RATE, Sample, SubmitError,
};

/// Rendering failed
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("nothing to render: the silent generator produces no buffers")]
    SilentKind,

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("rendering stalled after {written} of {expected} samples")]
    Stalled { written: u64, expected: u64 },
}

/// WAV format matching the live output
pub fn wav_spec() -> hound::WavSpec {
    hound::WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Driver that appends submitted buffers to a WAV stream, up to a sample limit
pub struct WavDriver<W: Write + Seek> {
    writer: hound::WavWriter<W>,
    pending: VecDeque<BufferId>,
    written: u64,
    limit: u64,
}

impl<W: Write + Seek> WavDriver<W> {
    pub fn new(writer: hound::WavWriter<W>, limit: u64) -> Self {
        Self {
            writer,
            pending: VecDeque::with_capacity(2),
            written: 0,
            limit,
        }
    }

    /// Next buffer to report as played, in submission order
    pub fn next_completion(&mut self) -> Option<BufferId> {
        self.pending.pop_front()
    }

    /// Samples written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn is_complete(&self) -> bool {
        self.written >= self.limit
    }

    /// Flush the WAV header and return the number of samples written
    pub fn finish(self) -> Result<u64, hound::Error> {
        self.writer.finalize()?;
        Ok(self.written)
    }
}

impl<W: Write + Seek> PlaybackDriver for WavDriver<W> {
    fn submit(&mut self, buffer: BufferId, samples: &[Sample]) -> Result<(), SubmitError> {
        let room = self.limit.saturating_sub(self.written);
        let take = samples.len().min(room as usize);
        for &sample in &samples[..take] {
            self.writer
                .write_sample(sample)
                .map_err(|e| SubmitError::Sink(e.to_string()))?;
        }
        self.written += take as u64;
        self.pending.push_back(buffer);
        Ok(())
    }
}

/// Parameters for [`render_file`]
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub kind: GeneratorKind,
    /// Total samples to write
    pub samples: u64,
    pub engine: EngineConfig,
}

impl RenderOptions {
    /// Samples covering `seconds` of output at the fixed sample rate
    pub fn samples_for_seconds(seconds: f64) -> u64 {
        (seconds.max(0.0) * SAMPLE_RATE as f64).round() as u64
    }
}

/// Render `options.samples` samples of noise to a WAV file at `path`.
///
/// Returns the number of samples written.
pub fn render_file(path: &Path, options: RenderOptions) -> Result<u64, RenderError> {
    if options.kind == GeneratorKind::None {
        return Err(RenderError::SilentKind);
    }
    let writer = hound::WavWriter::create(path, wav_spec())?;
    let written = render(writer, options)?;
    info!("Rendered {} samples of {} noise to {}", written, options.kind, path.display());
    Ok(written)
}

/// Render into an open WAV writer, finalizing it.
pub fn render<W: Write + Seek>(
    writer: hound::WavWriter<W>,
    options: RenderOptions,
) -> Result<u64, RenderError> {
    if options.kind == GeneratorKind::None {
        return Err(RenderError::SilentKind);
    }

    let mut engine = PlaybackEngine::new(
        options.engine,
        WavDriver::new(writer, options.samples),
        MemoryPreferenceStore::with_stored(options.kind.as_stored()),
    );

    engine.refill();
    while !engine.driver().is_complete() {
        let Some(buffer) = engine.driver_mut().next_completion() else {
            return Err(RenderError::Stalled {
                written: engine.driver().written(),
                expected: options.samples,
            });
        };
        engine.on_playback_completed(buffer);
    }

    debug!("Render finished after {} buffers", engine.status().submitted_total);
    Ok(engine.into_driver().finish()?)
}
