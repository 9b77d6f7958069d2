//! Mapbox picker (tile-based)
//!
//! Flies to externally chosen locations at city zoom. Uses Mapbox style
//! tiles when an access token is configured and OSM tiles otherwise.

use crate::constants::map::{MAPBOX_TILE_URL, MAPBOX_ZOOM, OSM_TILE_URL, TILE_FALLBACK};
use crate::location::Coordinates;
use crate::map::{tile_for, MapEvent, MapPicker, PinState, Tile};

/// Mapbox GL style picker
#[derive(Debug, Clone)]
pub struct MapboxPicker {
    pin: PinState,
    token: String,
}

impl MapboxPicker {
    /// Create a picker; an empty token falls back to OSM tiles
    pub fn new(token: &str) -> Self {
        Self {
            pin: PinState::new(TILE_FALLBACK.into(), MAPBOX_ZOOM),
            token: token.to_string(),
        }
    }

    /// Tile under the marker
    pub fn tile(&self) -> Tile {
        tile_for(self.pin.marker(), self.pin.zoom())
    }
}

impl MapPicker for MapboxPicker {
    fn name(&self) -> &'static str {
        "mapbox"
    }

    fn render(&mut self, marked: Option<Coordinates>) {
        self.pin.render(marked);
    }

    fn marker(&self) -> Coordinates {
        self.pin.marker()
    }

    fn center(&self) -> Coordinates {
        self.pin.center()
    }

    fn zoom(&self) -> u8 {
        self.pin.zoom()
    }

    fn handle(&mut self, event: MapEvent) -> Option<Coordinates> {
        self.pin.handle(event)
    }

    fn view_url(&self) -> String {
        if self.token.is_empty() {
            self.tile().url(OSM_TILE_URL)
        } else {
            self.tile()
                .url(MAPBOX_TILE_URL)
                .replace("{token}", &urlencoding::encode(&self.token))
        }
    }
}
