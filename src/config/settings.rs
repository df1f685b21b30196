use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::RecordKey;
use crate::util::paths::{config_path, database_path};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Record store implementation selected by configuration
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Record store backend
    pub backend: StoreBackend,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Storage slot used when none is given
    pub default_key: RecordKey,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            database_path: database_path(),
            default_key: RecordKey::from("Counter"),
        }
    }
}

/// TOML representation of the [store] section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlStoreConfig {
    pub backend: Option<StoreBackend>,
    pub database_path: Option<PathBuf>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub default_key: Option<RecordKey>,
    pub store: Option<TomlStoreConfig>,
}

impl Config {
    /// Load configuration from the default location, merging with defaults.
    ///
    /// Writes the bundled example on first run. An unreadable or invalid file
    /// is logged and ignored.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring config file");
                Config::default()
            }
        }
    }

    /// Load configuration from `path`, merging with defaults.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if !path.exists() {
            return Ok(config);
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let toml_config: TomlConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(key) = toml_config.default_key {
            config.default_key = key;
        }

        if let Some(store) = toml_config.store {
            if let Some(backend) = store.backend {
                config.backend = backend;
            }
            if let Some(database_path) = store.database_path {
                config.database_path = database_path;
            }
        }

        Ok(config)
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(error = %e, "Failed to create config directory");
                return;
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_default_key(mut self, key: impl Into<RecordKey>) -> Self {
        self.default_key = key.into();
        self
    }
}
