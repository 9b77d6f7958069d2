//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/loc-admin/config.toml

pub mod defaults;

use crate::constants::api::{NOMINATIM_URL, STORE_URL};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Location store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Geocoding settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Map picker settings
    #[serde(default)]
    pub map: MapConfig,

    /// API keys for various services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Location store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store backend (without the `/api/v1/location` path)
    #[serde(default = "default_store_url")]
    pub base_url: String,
}

/// Geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Geocoding provider: "nominatim" or "google"
    #[serde(default = "default_geocoder")]
    pub provider: String,

    /// Nominatim instance
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// Maximum candidates per address search
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

/// Map picker settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Map picker: "mapbox", "google" or "openlayers"
    #[serde(default = "default_map_provider")]
    pub provider: String,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Google Maps Platform key (geocoding)
    #[serde(default)]
    pub google: String,

    /// Mapbox access token (tiles)
    #[serde(default)]
    pub mapbox: String,
}

// Default value functions for serde
fn default_store_url() -> String {
    STORE_URL.to_string()
}
fn default_geocoder() -> String {
    DEFAULT_GEOCODER.to_string()
}
fn default_nominatim_url() -> String {
    NOMINATIM_URL.to_string()
}
fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}
fn default_map_provider() -> String {
    DEFAULT_MAP_PROVIDER.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_url(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            provider: default_geocoder(),
            nominatim_url: default_nominatim_url(),
            search_limit: default_search_limit(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            provider: default_map_provider(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["store", "base_url"] => Some(self.store.base_url.clone()),

            ["geocoder", "provider"] => Some(self.geocoder.provider.clone()),
            ["geocoder", "nominatim_url"] => Some(self.geocoder.nominatim_url.clone()),
            ["geocoder", "search_limit"] => Some(self.geocoder.search_limit.to_string()),

            ["map", "provider"] => Some(self.map.provider.clone()),

            ["api_keys", "google"] => Some(self.api_keys.google.clone()),
            ["api_keys", "mapbox"] => Some(self.api_keys.mapbox.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["store", "base_url"] => {
                self.store.base_url = value.trim_end_matches('/').to_string();
            }

            ["geocoder", "provider"] => {
                if !crate::geo::available_geocoders().contains(&value) {
                    return Err(Error::Config(format!("Unknown geocoder: {}", value)));
                }
                self.geocoder.provider = value.to_string();
            }
            ["geocoder", "nominatim_url"] => {
                self.geocoder.nominatim_url = value.trim_end_matches('/').to_string();
            }
            ["geocoder", "search_limit"] => {
                self.geocoder.search_limit = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid search limit: {}", value))
                })?;
            }

            ["map", "provider"] => {
                if !crate::map::available_pickers().contains(&value) {
                    return Err(Error::Config(format!("Unknown map provider: {}", value)));
                }
                self.map.provider = value.to_string();
            }

            ["api_keys", "google"] => {
                self.api_keys.google = value.to_string();
            }
            ["api_keys", "mapbox"] => {
                self.api_keys.mapbox = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "store.base_url",
            "geocoder.provider",
            "geocoder.nominatim_url",
            "geocoder.search_limit",
            "map.provider",
            "api_keys.google",
            "api_keys.mapbox",
        ]
    }

    /// Full URL of the location collection
    pub fn location_url(&self) -> String {
        format!(
            "{}{}",
            self.store.base_url.trim_end_matches('/'),
            crate::constants::api::LOCATION_PATH
        )
    }
}
