//! Persisted generator preference
//!
//! The engine reads the preference once at construction and writes it on
//! every kind switch. Loading never fails: anything unreadable resolves to
//! [`GeneratorKind::Brown`].

use std::path::{Path, PathBuf};

use crate::config::{self, ConfigError};
use crate::generator::GeneratorKind;

/// Storage for the selected [`GeneratorKind`]
pub trait PreferenceStore {
    fn load(&self) -> GeneratorKind;

    fn save(&mut self, kind: GeneratorKind) -> Result<(), ConfigError>;
}

/// Preference kept in the `[noise]` section of a config file.
///
/// Saving rewrites only `generator_kind`; other settings in the file survive.
#[derive(Debug, Clone)]
pub struct TomlPreferenceStore {
    path: PathBuf,
}

impl TomlPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config location, if one can be determined
    pub fn default_location() -> Option<Self> {
        config::config_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn load(&self) -> GeneratorKind {
        config::load_from(&self.path).noise.kind()
    }

    fn save(&mut self, kind: GeneratorKind) -> Result<(), ConfigError> {
        config::save_generator_kind(&self.path, kind.as_stored())
    }
}

/// In-memory preference holding the raw stored value
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    stored: Option<u32>,
    saves: usize,
}

impl MemoryPreferenceStore {
    /// Store that already holds `value`, valid or not
    pub fn with_stored(value: u32) -> Self {
        Self {
            stored: Some(value),
            saves: 0,
        }
    }

    pub fn stored(&self) -> Option<u32> {
        self.stored
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> GeneratorKind {
        self.stored
            .map(GeneratorKind::from_stored)
            .unwrap_or_default()
    }

    fn save(&mut self, kind: GeneratorKind) -> Result<(), ConfigError> {
        self.stored = Some(kind.as_stored());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CONFIG_FILE_NAME, Config, EngineSettings};

    #[test]
    fn test_memory_store_empty_is_brown() {
        assert_eq!(MemoryPreferenceStore::default().load(), GeneratorKind::Brown);
    }

    #[test]
    fn test_memory_store_corrupt_value_is_brown() {
        assert_eq!(
            MemoryPreferenceStore::with_stored(99).load(),
            GeneratorKind::Brown
        );
    }

    #[test]
    fn test_memory_store_save() {
        let mut store = MemoryPreferenceStore::default();
        store.save(GeneratorKind::None).unwrap();
        assert_eq!(store.stored(), Some(0));
        assert_eq!(store.load(), GeneratorKind::None);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_toml_store_missing_file_is_brown() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlPreferenceStore::new(dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(store.load(), GeneratorKind::Brown);
    }

    #[test]
    fn test_toml_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TomlPreferenceStore::new(dir.path().join(CONFIG_FILE_NAME));
        store.save(GeneratorKind::White).unwrap();
        assert_eq!(store.load(), GeneratorKind::White);

        let reopened = TomlPreferenceStore::new(store.path());
        assert_eq!(reopened.load(), GeneratorKind::White);
    }

    #[test]
    fn test_toml_store_keeps_engine_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = Config {
            engine: EngineSettings {
                buffer_samples: 2048,
                seed: Some(5),
            },
            ..Config::default()
        };
        config::save_to(&path, &config).unwrap();

        let mut store = TomlPreferenceStore::new(&path);
        store.save(GeneratorKind::None).unwrap();

        let reloaded = config::load_from(&path);
        assert_eq!(reloaded.noise.kind(), GeneratorKind::None);
        assert_eq!(reloaded.engine, config.engine);
    }

    #[test]
    fn test_toml_store_malformed_kind_keeps_engine_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[noise]\ngenerator_kind = -1\n\n[engine]\nbuffer_samples = 2048\nseed = 5\n",
        )
        .unwrap();

        let mut store = TomlPreferenceStore::new(&path);
        assert_eq!(store.load(), GeneratorKind::Brown);
        store.save(GeneratorKind::White).unwrap();

        let reloaded = config::load_from(&path);
        assert_eq!(reloaded.noise.kind(), GeneratorKind::White);
        assert_eq!(
            reloaded.engine,
            EngineSettings {
                buffer_samples: 2048,
                seed: Some(5),
            }
        );
    }

    #[test]
    fn test_toml_store_out_of_range_is_brown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[noise]\ngenerator_kind = 99\n").unwrap();
        assert_eq!(TomlPreferenceStore::new(&path).load(), GeneratorKind::Brown);
    }
}
