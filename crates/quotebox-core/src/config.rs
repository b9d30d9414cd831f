use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Loaded from `config.toml` in the platform config dir. Missing file or
/// missing keys fall back to defaults; CLI flags override on top.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load config from default location, or defaults if there's no file
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path; a missing file yields defaults
    pub fn load_from(config_path: &Path) -> crate::Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// `<config_dir>/quotebox/config.toml` (XDG on Linux, AppData on Windows)
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("quotebox");

        Ok(config_dir.join("config.toml"))
    }

    /// Database path from config, or `<data_dir>/quotebox/quotebox.db`
    pub fn db_path(&self) -> crate::Result<PathBuf> {
        if let Some(path) = &self.storage.db_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?;
        Ok(data_dir.join("quotebox").join("quotebox.db"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the posts API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How many remote items become quotes on load
    #[serde(default = "default_seed_limit")]
    pub seed_limit: usize,

    /// Category given to quotes pulled from the remote
    #[serde(default = "default_seed_category")]
    pub seed_category: String,
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

fn default_seed_limit() -> usize {
    10
}

fn default_seed_category() -> String {
    "server".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            seed_limit: default_seed_limit(),
            seed_category: default_seed_category(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Master switch; off means no remote calls at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Pull the seed batch when `watch` starts
    #[serde(default = "default_true")]
    pub fetch_on_start: bool,

    /// Push everything after each add/import
    #[serde(default = "default_true")]
    pub push_on_change: bool,

    /// Seconds between periodic pushes
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    300 // 5 minutes
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fetch_on_start: true,
            push_on_change: true,
            interval_secs: default_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the SQLite file location
    #[serde(default)]
    pub db_path: Option<PathBuf>,

    /// Start with the built-in quotes when nothing was saved yet
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            seed_defaults: true,
        }
    }
}
