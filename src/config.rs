//! Configuration for loading locations and building the index.
//!
//! Kept small and serializable so it can be loaded from JSON or TOML.

use crate::error::{GeoError, Result};
use crate::kdtree::PruningBound;
use crate::loader::LoaderOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// geokd configuration
///
/// # Example
///
/// ```rust
/// use geokd::{Config, PruningBound};
///
/// let config = Config::default();
/// assert_eq!(config.pruning, PruningBound::Planar);
///
/// let json = r#"{
///     "data_path": "cities.csv",
///     "validate_coordinates": true,
///     "pruning": "spherical"
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert!(config.validate_coordinates);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// CSV file holding `label, latitude, longitude` records
    #[serde(default = "Config::default_data_path")]
    pub data_path: PathBuf,

    /// Skip records with coordinates outside [-90, 90] x [-180, 180]
    #[serde(default)]
    pub validate_coordinates: bool,

    /// Bound used to prune the far side of a split during queries
    #[serde(default)]
    pub pruning: PruningBound,
}

impl Config {
    fn default_data_path() -> PathBuf {
        PathBuf::from("data/locations.csv")
    }

    pub fn with_data_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_coordinates = enabled;
        self
    }

    pub fn with_pruning(mut self, pruning: PruningBound) -> Self {
        self.pruning = pruning;
        self
    }

    /// Loader options derived from this configuration.
    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            validate_coordinates: self.validate_coordinates,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(GeoError::Config("data_path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| GeoError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GeoError::Config(e.to_string()))
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str).map_err(|e| GeoError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GeoError::Config(e.to_string()))
    }

    /// Load a configuration file, choosing the format by extension.
    ///
    /// `.json` is parsed as JSON; anything else as TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GeoError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&text),
            _ => Self::from_toml(&text),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: Self::default_data_path(),
            validate_coordinates: false,
            pruning: PruningBound::default(),
        }
    }
}
