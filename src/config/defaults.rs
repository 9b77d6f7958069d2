//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default geocoding provider
pub const DEFAULT_GEOCODER: &str = "nominatim";

/// Default number of address candidates requested per search
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Default map picker
pub const DEFAULT_MAP_PROVIDER: &str = "openlayers";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "loc-admin";
