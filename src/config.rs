use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::search::DEFAULT_MAX_COOK_TIME;
use crate::store;

/// Read-aloud settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speaking rate relative to the synthesiser's normal pace.
    pub rate: f32,
    /// Synthesiser to run instead of auto-detecting one (e.g. "espeak-ng")
    pub command: Option<String>,
    pub enabled: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 0.9,
            command: None,
            enabled: true,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Recipe JSON to load instead of the bundled catalog
    pub catalog_path: Option<PathBuf>,
    /// Initial cook-time bound on the browse screen, in minutes
    pub default_max_cook_time: u32,
    pub similar_limit: usize,
    /// Recipes shown per page when browsing
    pub page_size: usize,
    pub share_base_url: String,
    pub speech: SpeechConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            default_max_cook_time: DEFAULT_MAX_COOK_TIME,
            similar_limit: 3,
            page_size: 6,
            share_base_url: "https://gastroguru.app/recipe".into(),
            speech: SpeechConfig::default(),
        }
    }
}

impl Config {
    fn path() -> PathBuf {
        store::config_dir().join("config.json")
    }

    /// Load from disk, returning defaults if file doesn't exist or is invalid.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        store::load_or_default(path)
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        store::save_json(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.default_max_cook_time, 120);
        assert_eq!(config.speech.rate, 0.9);
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::default();
        config.page_size = 12;
        config.speech.command = Some("espeak".into());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"similar_limit": 5}"#).unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.similar_limit, 5);
        assert_eq!(config.page_size, 6);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }
}
