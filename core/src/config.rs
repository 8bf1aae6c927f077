//! Configuration management (config.toml)
//!
//! Handles loading, saving, and providing defaults for noisegen settings.
//! Settings are stored in TOML format in the platform-specific config directory.
//!
//! ```toml
//! [noise]
//! generator_kind = 2   # 0 = none, 1 = white, 2 = brown
//!
//! [engine]
//! buffer_samples = 4096
//! seed = 1234          # optional, for reproducible output
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::EngineConfig;
use crate::format::BUFFER_SAMPLES;
use crate::generator::GeneratorKind;

/// Name of the settings file inside [`config_dir`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Noisegen configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Persisted generator preference
    #[serde(default)]
    pub noise: NoiseConfig,
    /// Buffer sizing and seeding
    #[serde(default)]
    pub engine: EngineSettings,
}

/// Generator preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Raw stored kind (default: 2 = brown). Out-of-range values read as brown,
    /// values that are not a `u32` at all read as the default.
    #[serde(
        default = "default_generator_kind",
        deserialize_with = "lenient_generator_kind"
    )]
    pub generator_kind: u32,
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Samples per buffer (default: 4096, 0 means default)
    #[serde(default = "default_buffer_samples")]
    pub buffer_samples: usize,
    /// Fixed PRNG seed (default: none, seeded randomly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_generator_kind() -> u32 {
    GeneratorKind::default().as_stored()
}
fn default_buffer_samples() -> usize {
    BUFFER_SAMPLES
}

/// A bad preference must not discard the rest of the file
fn lenient_generator_kind<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = toml::Value::deserialize(deserializer)?;
    Ok(value
        .as_integer()
        .and_then(|raw| u32::try_from(raw).ok())
        .unwrap_or_else(default_generator_kind))
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            generator_kind: default_generator_kind(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            buffer_samples: default_buffer_samples(),
            seed: None,
        }
    }
}

impl NoiseConfig {
    /// Stored kind, with invalid values resolved to the default
    pub fn kind(&self) -> GeneratorKind {
        GeneratorKind::from_stored(self.generator_kind)
    }
}

impl EngineSettings {
    pub fn engine_config(&self) -> EngineConfig {
        let buffer_samples = if self.buffer_samples == 0 {
            BUFFER_SAMPLES
        } else {
            self.buffer_samples
        };
        EngineConfig {
            buffer_samples,
            seed: self.seed,
        }
    }
}

/// Error writing configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Noisegen\config`
/// On macOS: `~/Library/Application Support/io.noisegen.Noisegen`
/// On Linux: `~/.config/noisegen`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.noisegen", "", "Noisegen")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default location of the settings file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from the default location.
///
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    config_path().map(|path| load_from(&path)).unwrap_or_default()
}

/// Loads the configuration from `path`, falling back to defaults.
pub fn load_from(path: &Path) -> Config {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}

/// Writes `config` to `path`, creating parent directories as needed.
pub fn save_to(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Sets `[noise] generator_kind` in the file at `path`.
///
/// Every other key is written back as it was read, including ones this
/// version does not know about. An unparsable file is replaced.
pub fn save_generator_kind(path: &Path, stored: u32) -> Result<(), ConfigError> {
    let mut table: toml::Table = std::fs::read_to_string(path)
        .ok()
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default();

    let value = toml::Value::Integer(i64::from(stored));
    match table.get_mut("noise") {
        Some(toml::Value::Table(noise)) => {
            noise.insert("generator_kind".to_string(), value);
        }
        _ => {
            let mut noise = toml::Table::new();
            noise.insert("generator_kind".to_string(), value);
            table.insert("noise".to_string(), toml::Value::Table(noise));
        }
    }

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, toml::to_string_pretty(&table)?)?;
    Ok(())
}
