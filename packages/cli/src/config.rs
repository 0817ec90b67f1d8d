//! Application configuration.
//!
//! The built-in defaults live in `config/default.toml` and are embedded at
//! compile time. A user file given with `--config` is read instead; keys it
//! omits keep their default values.

use std::path::{Path, PathBuf};

use rent_map_navigation::ViewportConfig;
use rent_map_region_models::BoundarySource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`MapConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "RENT_MAP_DATA_DIR";

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Errors that can occur while reading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML or has the wrong shape.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Where the map data lives and how the map behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Directory holding the boundary and rent files.
    pub data_dir: PathBuf,
    /// Rent table, relative to `data_dir`.
    pub rent_file: String,
    /// City shown at startup.
    pub default_city: String,
    /// Optional top-level boundary collection.
    pub regions: Option<BoundarySource>,
    pub viewport: ViewportConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            rent_file: "rent_prices.json".to_string(),
            default_city: "Berlin".to_string(),
            regions: None,
            viewport: ViewportConfig::default(),
        }
    }
}

impl MapConfig {
    /// The embedded default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the embedded file is not valid, which is caught by tests.
    #[must_use]
    pub fn builtin() -> Self {
        toml::from_str(DEFAULT_CONFIG)
            .unwrap_or_else(|e| panic!("Failed to parse config/default.toml: {e}"))
    }

    /// Reads `path`, or the built-in configuration if `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };

        log::info!("Reading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies the data directory overrides. The command line flag wins
    /// over the environment, which wins over the file.
    #[must_use]
    pub fn with_data_dir(mut self, env: Option<String>, flag: Option<PathBuf>) -> Self {
        if let Some(dir) = flag.or_else(|| env.filter(|s| !s.is_empty()).map(PathBuf::from)) {
            log::debug!("Using data directory {}", dir.display());
            self.data_dir = dir;
        }
        self
    }

    /// Absolute or working-directory-relative path of the rent table.
    #[must_use]
    pub fn rent_path(&self) -> PathBuf {
        self.data_dir.join(&self.rent_file)
    }
}
