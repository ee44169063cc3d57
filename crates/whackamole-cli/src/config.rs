//! Config file and data directory resolution.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};
use whackamole_core::config::store::{LEDGER_FILE, PREFERENCES_FILE};
use whackamole_core::{EngineConfig, HighScoreStore, ScoreLedger};

/// Contents of `whackamole.toml`.
///
/// ```toml
/// data_dir = "/home/me/.whackamole"
///
/// [engine]
/// round_duration_secs = 30
/// seed = 42
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Load the config, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Command line > config file > platform data dir > current directory.
    pub fn resolve_data_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .or_else(|| dirs::data_dir().map(|dir| dir.join("whackamole")))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Location of the on-disk stores.
pub struct DataStores {
    data_dir: PathBuf,
}

impl DataStores {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn open_high_score(&self) -> Result<HighScoreStore> {
        let path = self.data_dir.join(PREFERENCES_FILE);
        HighScoreStore::open(&path)
            .with_context(|| format!("Failed to open high score store {}", path.display()))
    }

    pub fn open_ledger(&self) -> Result<ScoreLedger> {
        let path = self.data_dir.join(LEDGER_FILE);
        ScoreLedger::open(&path)
            .with_context(|| format!("Failed to open score ledger {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_partial_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("whackamole.toml");
        fs::write(&path, "[engine]\nround_duration_secs = 10\nseed = 9\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.engine.round_duration_secs, 10);
        assert_eq!(config.engine.seed, Some(9));
        assert_eq!(config.engine.grid_size, 9);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_broken_config_falls_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("whackamole.toml");
        fs::write(&path, "engine = [not toml").unwrap();

        let config = AppConfig::load_or_default(&path);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_missing_config_is_default() {
        let config = AppConfig::load_or_default(Path::new("/nonexistent/whackamole.toml"));
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_data_dir_precedence() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("from-file")),
            engine: EngineConfig::default(),
        };
        assert_eq!(
            config.resolve_data_dir(Some(Path::new("from-cli"))),
            PathBuf::from("from-cli")
        );
        assert_eq!(config.resolve_data_dir(None), PathBuf::from("from-file"));
    }

    #[test]
    fn test_stores_open_in_data_dir() {
        let temp = TempDir::new().unwrap();
        let stores = DataStores::new(temp.path().to_path_buf());
        let store = stores.open_high_score().unwrap();
        store.record_if_high_score(3).unwrap();
        assert!(temp.path().join(PREFERENCES_FILE).exists());

        let ledger = stores.open_ledger().unwrap();
        ledger.create_owner("alice", "x").unwrap();
        assert!(temp.path().join(LEDGER_FILE).exists());
    }
}
