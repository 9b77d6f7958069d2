//! OpenLayers picker (tile-based over OpenStreetMap)

use crate::constants::map::{DETAIL_ZOOM, OSM_TILE_URL, TILE_FALLBACK};
use crate::location::Coordinates;
use crate::map::{tile_for, MapEvent, MapPicker, PinState, Tile};

/// OpenLayers picker with a draggable marker
#[derive(Debug, Clone)]
pub struct OpenLayersPicker {
    pin: PinState,
}

impl OpenLayersPicker {
    pub fn new() -> Self {
        Self {
            pin: PinState::new(TILE_FALLBACK.into(), DETAIL_ZOOM),
        }
    }

    /// Tile under the marker
    pub fn tile(&self) -> Tile {
        tile_for(self.pin.marker(), self.pin.zoom())
    }

    /// Raster tile URL under the marker
    pub fn tile_url(&self) -> String {
        self.tile().url(OSM_TILE_URL)
    }
}

impl Default for OpenLayersPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl MapPicker for OpenLayersPicker {
    fn name(&self) -> &'static str {
        "openlayers"
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
        let marker = self.pin.marker();
        format!(
            "https://www.openstreetmap.org/?mlat={}&mlon={}#map={}/{}/{}",
            marker.lat,
            marker.lng,
            self.pin.zoom(),
            marker.lat,
            marker.lng
        )
    }
}
