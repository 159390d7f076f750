use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{env, fs, path::PathBuf};

use crate::model::Coordinate;

/// Environment variable overriding the configured API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const DEFAULT_CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";
const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";

// Startup location shown before the user searches for a city (Delhi, India).
const DEFAULT_LATITUDE: f64 = 28.6139;
const DEFAULT_LONGITUDE: f64 = 77.2090;

/// Runtime configuration.
///
/// Loaded from an optional `config.toml`; every field has a default, so a
/// missing file (the common case) yields a working configuration. The API
/// key is the only secret and is usually supplied via [`API_KEY_ENV`]. A
/// missing key is not validated here: requests simply fail upstream with an
/// authorization error and surface as the generic fetch-error message.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub current_url: String,
    pub forecast_url: String,
    pub geocoding_url: String,
    pub default_latitude: f64,
    pub default_longitude: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            current_url: DEFAULT_CURRENT_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            default_latitude: DEFAULT_LATITUDE,
            default_longitude: DEFAULT_LONGITUDE,
        }
    }
}

impl Config {
    /// Load config from disk (if the file exists), then apply the
    /// environment override for the API key.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;

        let cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            // First run: no config file, use defaults.
            Self::default()
        };

        Ok(cfg.with_env_key(env::var(API_KEY_ENV).ok()))
    }

    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn with_env_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key {
            self.api_key = key;
        }
        self
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "dashboard", "dashboard-core")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Location fetched on startup, before any city is selected.
    pub fn default_coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.default_latitude,
            longitude: self.default_longitude,
        }
    }
}
