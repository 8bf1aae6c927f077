//! Noisegen - Continuous noise player
//!
//! # Usage
//!
//! ```bash
//! noisegen                         # play the saved generator (brown by default)
//! noisegen play --kind white       # play white noise and remember the choice
//! noisegen render rain.wav --kind brown --seconds 60
//! ```
//!
//! While playing, type `white`, `brown`, `none` or `quit` on stdin.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use noisegen::console;
use noisegen::output::AudioOutput;
use noisegen::render::{RenderOptions, render_file};
use noisegen_core::config;
use noisegen_core::{
    EngineConfig, EngineThread, GeneratorKind, PlaybackEngine, PreferenceStore, SAMPLE_RATE,
    TomlPreferenceStore,
};

/// Noisegen - continuous white/brown noise player
#[derive(Parser)]
#[command(name = "noisegen")]
#[command(author, version, about = "Continuous white/brown noise player")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play noise on the default output device (default command)
    Play(PlayArgs),

    /// Render noise to a mono 16-bit 44.1 kHz WAV file
    Render(RenderArgs),
}

#[derive(Args, Default)]
struct PlayArgs {
    /// Generator to start with (none, white, brown); saved as the new default
    #[arg(long, short = 'k')]
    kind: Option<GeneratorKind>,

    /// Fixed PRNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct RenderArgs {
    /// Output WAV path
    output: PathBuf,

    /// Generator to render (white or brown)
    #[arg(long, short = 'k', default_value = "brown")]
    kind: GeneratorKind,

    /// Duration in seconds
    #[arg(long, short = 's', default_value = "10", value_parser = parse_seconds)]
    seconds: f64,

    /// Fixed PRNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Samples per buffer
    #[arg(long, default_value_t = noisegen_core::BUFFER_SAMPLES)]
    buffer_samples: usize,
}

/// Accept only finite, non-negative durations
fn parse_seconds(value: &str) -> Result<f64, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("duration must be a finite number of seconds >= 0, got '{value}'"));
    }
    Ok(seconds)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Play(args)) => play(args),
        Some(Commands::Render(args)) => render(args),
        None => play(PlayArgs::default()),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let (settings, mut store) = match args.config {
        Some(path) => (config::load_from(&path), TomlPreferenceStore::new(path)),
        None => (
            config::load(),
            TomlPreferenceStore::default_location()
                .context("could not determine config directory")?,
        ),
    };

    if let Some(kind) = args.kind {
        if let Err(e) = store.save(kind) {
            warn!("Failed to save generator preference: {}", e);
        }
    }

    let mut engine_config = settings.engine.engine_config();
    if args.seed.is_some() {
        engine_config.seed = args.seed;
    }

    let events = EngineThread::new();
    let (output, driver) = AudioOutput::open(engine_config.buffer_samples, events.completion_sink())
        .context("failed to open audio output")?;
    info!("Config: {}", store.path().display());

    let engine = PlaybackEngine::new(engine_config, driver, store);
    let handle = events
        .spawn(engine)
        .context("failed to spawn engine thread")?;

    console::run(io::stdin().lock(), io::stdout(), &handle)?;

    info!("Stopping playback");
    drop(handle);
    drop(output);
    Ok(())
}

fn render(args: RenderArgs) -> Result<()> {
    let options = RenderOptions {
        kind: args.kind,
        samples: RenderOptions::samples_for_seconds(args.seconds),
        engine: EngineConfig {
            buffer_samples: args.buffer_samples,
            seed: args.seed,
        },
    };
    let written = render_file(&args.output, options)
        .with_context(|| format!("failed to render {}", args.output.display()))?;
    println!(
        "Wrote {} samples ({:.1}s) to {}",
        written,
        written as f64 / SAMPLE_RATE as f64,
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("2.5"), Ok(2.5));
        assert_eq!(parse_seconds("0"), Ok(0.0));
        assert!(parse_seconds("inf").is_err());
        assert!(parse_seconds("NaN").is_err());
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("ten").is_err());
    }

    #[test]
    fn test_render_rejects_infinite_seconds() {
        let result = Cli::try_parse_from(["noisegen", "render", "out.wav", "--seconds", "inf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_silent_kind_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = RenderArgs {
            output: dir.path().join("none.wav"),
            kind: GeneratorKind::None,
            seconds: 1.0,
            seed: None,
            buffer_samples: 64,
        };
        let err = render(args).unwrap_err();
        assert!(format!("{err:#}").contains("silent generator"));
    }
}
