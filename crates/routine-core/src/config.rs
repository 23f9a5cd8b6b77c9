use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::chat::DEFAULT_MAX_TOKENS;
use crate::catalog::CatalogSource;
use crate::error::StorageError;

pub const APP_DIR: &str = "routine-advisor";
pub const DEFAULT_CATALOG: &str = "data/products.json";
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://lorealchatbot.mxk2179.workers.dev/";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// File path or http(s) URL of the catalog document
    pub catalog: String,
    pub chat_endpoint: String,
    pub max_tokens: u32,
    pub thinking_delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Overrides the default storage file under the data directory
    pub storage_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: DEFAULT_CATALOG.to_string(),
            chat_endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            thinking_delay_ms: 500,
            request_timeout_secs: 60,
            storage_path: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the user config file, or defaults when it does not exist
    pub fn load() -> Result<Self, StorageError> {
        match Self::get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::new()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn save(&self) -> Result<(), StorageError> {
        let path = Self::get_config_path().ok_or_else(|| StorageError::Io {
            path: PathBuf::from(APP_DIR),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no config directory"),
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `ROUTINE_CATALOG` and `ROUTINE_CHAT_ENDPOINT` take precedence over the file
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var("ROUTINE_CATALOG").ok(),
            std::env::var("ROUTINE_CHAT_ENDPOINT").ok(),
        );
    }

    pub fn apply_overrides(&mut self, catalog: Option<String>, chat_endpoint: Option<String>) {
        if let Some(catalog) = catalog.filter(|c| !c.trim().is_empty()) {
            self.catalog = catalog;
        }
        if let Some(endpoint) = chat_endpoint.filter(|e| !e.trim().is_empty()) {
            self.chat_endpoint = endpoint;
        }
    }

    pub fn catalog_source(&self) -> CatalogSource {
        CatalogSource::parse(&self.catalog)
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| data_dir().join("storage.json"))
    }

    pub fn log_dir(&self) -> PathBuf {
        data_dir().join("logs")
    }

    fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }
}

/// Per-user data directory, falling back to the working directory
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR))
}
