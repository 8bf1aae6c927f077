//! Audio output using cpal and a pair of ring buffers
//!
//! The output format is fixed (mono, 44.1 kHz, 16-bit) and never negotiated.
//! Devices that only take `f32` at that rate and channel count are fed
//! converted samples; anything else is a [`DeviceError`].

mod queue;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{debug, error, info};

use noisegen_core::{CHANNELS, CompletionSink, SAMPLE_RATE, Sample};

pub use queue::{CpalDriver, PlaybackCursor, playback_queue};

/// The audio device could not be opened or started.
///
/// Fatal for playback: without a stream there is nothing to refill.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("failed to query output configurations: {0}")]
    SupportedConfigs(#[from] cpal::SupportedStreamConfigsError),

    #[error("output device does not accept mono 44100 Hz i16 or f32 audio")]
    UnsupportedFormat,

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to play audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// Open output stream; dropping it releases the device
pub struct AudioOutput {
    /// The cpal stream (kept alive for the duration)
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Open the default output device and start streaming.
    ///
    /// Returns the output together with the driver the engine submits to.
    /// Completions are reported through `completions`.
    pub fn open(
        buffer_samples: usize,
        completions: CompletionSink,
    ) -> Result<(Self, CpalDriver), DeviceError> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or(DeviceError::NoOutputDevice)?;
        let device_name = device.name().unwrap_or_else(|_| "<unnamed>".to_string());

        let sample_format = pick_sample_format(&device)?;
        let config = cpal::StreamConfig {
            channels: CHANNELS,
            sample_rate: cpal::SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        let (driver, mut cursor) = playback_queue(buffer_samples, completions);

        let stream = match sample_format {
            cpal::SampleFormat::I16 => device.build_output_stream(
                &config,
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    cursor.render(data);
                },
                |err| error!("Audio stream error: {}", err),
                None,
            )?,
            cpal::SampleFormat::F32 => {
                // Pre-allocate buffer for conversion
                let mut temp_buffer: Vec<Sample> = vec![0; buffer_samples];
                device.build_output_stream(
                    &config,
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        if temp_buffer.len() < data.len() {
                            temp_buffer.resize(data.len(), 0);
                        }
                        let temp = &mut temp_buffer[..data.len()];
                        cursor.render(temp);
                        for (out, &sample) in data.iter_mut().zip(temp.iter()) {
                            *out = sample as f32 / 32768.0;
                        }
                    },
                    |err| error!("Audio stream error: {}", err),
                    None,
                )?
            }
            _ => return Err(DeviceError::UnsupportedFormat),
        };

        stream.play()?;

        info!(
            "Audio output started on '{}' ({} Hz, mono, {:?})",
            device_name, SAMPLE_RATE, sample_format
        );

        Ok((Self { _stream: stream }, driver))
    }
}

/// Find a sample format the device supports at the fixed rate and channel count.
///
/// Prefers `i16`, which needs no conversion.
fn pick_sample_format(device: &cpal::Device) -> Result<cpal::SampleFormat, DeviceError> {
    let rate = cpal::SampleRate(SAMPLE_RATE);
    let formats: Vec<cpal::SampleFormat> = device
        .supported_output_configs()?
        .filter(|range| {
            range.channels() == CHANNELS
                && range.min_sample_rate() <= rate
                && rate <= range.max_sample_rate()
        })
        .map(|range| range.sample_format())
        .collect();
    debug!("Matching output formats: {:?}", formats);

    [cpal::SampleFormat::I16, cpal::SampleFormat::F32]
        .into_iter()
        .find(|format| formats.contains(format))
        .ok_or(DeviceError::UnsupportedFormat)
}
