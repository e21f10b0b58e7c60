//! Application configuration.
//!
//! Loaded from `config.toml` in the data directory. Every section has
//! defaults, so a missing file or a partial one is fine.

use crate::workouts::Coordinates;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Zoom level used when centering and panning the map.
pub const DEFAULT_ZOOM_LEVEL: u8 = 13;

/// Storage key of the workout snapshot.
pub const DEFAULT_SNAPSHOT_KEY: &str = "workouts";

/// Snapshot storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per snapshot key
    #[default]
    Json,
    /// SQLite database
    Sqlite,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Json => write!(f, "JSON"),
            StorageBackend::Sqlite => write!(f, "SQLite"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Map settings
    pub map: MapSettings,
    /// Storage settings
    pub storage: StorageSettings,
}

/// Map-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Zoom level for the initial view and for panning to a workout
    pub zoom_level: u8,
    /// Position reported when no live geolocation source is available
    pub home: Option<Coordinates>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom_level: DEFAULT_ZOOM_LEVEL,
            home: None,
        }
    }
}

/// Storage-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where snapshots are kept
    pub backend: StorageBackend,
    /// Key the workout snapshot is stored under
    pub snapshot_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "trailmark", "Trailmark")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location, writing the
/// defaults there on first run.
pub fn init_config() -> Result<AppConfig, ConfigError> {
    init_config_at(&get_config_path(), get_data_dir())
}

/// Load configuration from `path`, creating the file with defaults if it
/// does not exist yet.
pub fn init_config_at(path: &Path, data_dir: PathBuf) -> Result<AppConfig, ConfigError> {
    let first_run = !path.exists();
    let config = load_config_from(path, data_dir)?;

    if first_run {
        save_config_to(&config, path)?;
        tracing::info!(path = %path.display(), "Wrote default configuration");
    }

    Ok(config)
}

/// Load configuration from `path`, using `data_dir` as the data directory.
pub fn load_config_from(path: &Path, data_dir: PathBuf) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        let config = AppConfig {
            data_dir,
            ..Default::default()
        };
        return Ok(config);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir;

    Ok(config)
}

/// Save application configuration to `path`.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
