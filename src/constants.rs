//! Centralized constants for the loc-admin crate
//!
//! Endpoints and fixed values shared by the store client, geocoders,
//! map pickers and the table.

/// External API endpoints
pub mod api {
    /// Default location store backend
    pub const STORE_URL: &str = "https://nectar-101-backend.vercel.app";

    /// Collection path of the location resource
    pub const LOCATION_PATH: &str = "/api/v1/location";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Google Geocoding API (JSON output)
    pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

    /// User agent sent to geocoding providers (Nominatim rejects anonymous clients)
    pub const USER_AGENT: &str = concat!("loc-admin/", env!("CARGO_PKG_VERSION"));
}

/// Map picker defaults
pub mod map {
    /// Fallback center for the tile-based pickers (Coimbatore)
    pub const TILE_FALLBACK: (f64, f64) = (11.004556, 76.961632);

    /// Fallback marker for the provider-hosted picker (Chennai)
    pub const HOSTED_FALLBACK: (f64, f64) = (13.067439, 80.237617);

    /// Zoom used by the Mapbox picker
    pub const MAPBOX_ZOOM: u8 = 10;

    /// Zoom used by the Google and OpenLayers pickers
    pub const DETAIL_ZOOM: u8 = 16;

    /// OpenStreetMap raster tiles
    pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

    /// Mapbox style tiles (requires an access token)
    pub const MAPBOX_TILE_URL: &str =
        "https://api.mapbox.com/styles/v1/mapbox/streets-v12/tiles/{z}/{x}/{y}?access_token={token}";
}

/// Table settings
pub mod table {
    /// Rows shown per page
    pub const PAGE_SIZE: usize = 5;
}
