//! Map pickers
//!
//! A map picker shows a single marker and reports the coordinate the user
//! clicks or drags it to. Pickers never geocode; whoever owns the picker
//! decides what to do with the emitted coordinate.
//!
//! ## Flex Point
//! Adding a new provider requires:
//! 1. Create `src/map/{provider}.rs` implementing `MapPicker`
//! 2. Add `pub mod {provider};` below
//! 3. Register it in `get_picker` and `available_pickers`

pub mod google;
pub mod mapbox;
pub mod openlayers;

use crate::config::Config;
use crate::location::Coordinates;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A user interaction with the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// Click on empty map area
    Click(Coordinates),
    /// Marker dropped after a drag
    DragEnd(Coordinates),
}

impl MapEvent {
    pub fn coordinates(&self) -> Coordinates {
        match self {
            Self::Click(c) | Self::DragEnd(c) => *c,
        }
    }
}

/// Trait for map picker widgets
pub trait MapPicker: Send {
    /// Provider name (e.g., "mapbox", "google", "openlayers")
    fn name(&self) -> &'static str;

    /// Position the widget for an externally chosen location
    ///
    /// `None` or the `0, 0` placeholder shows the provider fallback.
    fn render(&mut self, marked: Option<Coordinates>);

    /// Current marker position
    fn marker(&self) -> Coordinates;

    /// Current view center
    fn center(&self) -> Coordinates;

    /// Current zoom level
    fn zoom(&self) -> u8;

    /// Apply a click or drag, returning the picked coordinate
    ///
    /// Out-of-range coordinates are ignored.
    fn handle(&mut self, event: MapEvent) -> Option<Coordinates>;

    /// A URL showing the current marker on this provider's map
    fn view_url(&self) -> String;
}

/// Marker/view state shared by every picker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinState {
    fallback: Coordinates,
    marker: Coordinates,
    center: Coordinates,
    zoom: u8,
}

impl PinState {
    pub fn new(fallback: Coordinates, zoom: u8) -> Self {
        Self {
            fallback,
            marker: fallback,
            center: fallback,
            zoom,
        }
    }

    pub fn render(&mut self, marked: Option<Coordinates>) {
        let target = marked
            .filter(|c| !c.is_origin() && c.validate().is_ok())
            .unwrap_or(self.fallback);
        self.marker = target;
        self.center = target;
    }

    pub fn handle(&mut self, event: MapEvent) -> Option<Coordinates> {
        let picked = event.coordinates();
        picked.validate().ok()?;
        self.marker = picked;
        self.center = picked;
        Some(picked)
    }

    pub fn marker(&self) -> Coordinates {
        self.marker
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }
}

/// A slippy-map tile address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl Tile {
    /// Fill a `{z}/{x}/{y}` URL template
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.z.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

/// Web Mercator latitude limit
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// The XYZ tile containing `coords` at `zoom`
pub fn tile_for(coords: Coordinates, zoom: u8) -> Tile {
    let n = 2f64.powi(i32::from(zoom));
    let max_index = n - 1.0;

    let lat = coords.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = ((coords.lng + 180.0) / 360.0 * n).floor();
    let y = ((1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * n).floor();

    Tile {
        x: x.clamp(0.0, max_index) as u32,
        y: y.clamp(0.0, max_index) as u32,
        z: zoom,
    }
}

/// Names accepted by [`get_picker`]
pub fn available_pickers() -> Vec<&'static str> {
    vec!["mapbox", "google", "openlayers"]
}

/// Get a picker by name
///
/// Returns the OpenLayers picker if name is not recognized
pub fn get_picker(name: &str, config: &Config) -> Box<dyn MapPicker> {
    match name.to_lowercase().as_str() {
        "mapbox" => Box::new(mapbox::MapboxPicker::new(&config.api_keys.mapbox)),
        "google" => Box::new(google::GooglePicker::new()),
        _ => Box::new(openlayers::OpenLayersPicker::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_for_origin() {
        assert_eq!(tile_for(Coordinates::new(0.0, 0.0), 0), Tile { x: 0, y: 0, z: 0 });
        assert_eq!(tile_for(Coordinates::new(0.0, 0.0), 1), Tile { x: 1, y: 1, z: 1 });
    }

    #[test]
    fn test_tile_for_corners_stay_in_range() {
        let tile = tile_for(Coordinates::new(90.0, 180.0), 3);
        assert_eq!(tile, Tile { x: 7, y: 0, z: 3 });

        let tile = tile_for(Coordinates::new(-90.0, -180.0), 3);
        assert_eq!(tile, Tile { x: 0, y: 7, z: 3 });
    }

    #[test]
    fn test_tile_url() {
        let tile = Tile { x: 3, y: 5, z: 4 };
        assert_eq!(tile.url("https://t/{z}/{x}/{y}.png"), "https://t/4/3/5.png");
    }

    #[test]
    fn test_pin_state_fallback_and_render() {
        let fallback = Coordinates::new(1.0, 2.0);
        let mut pin = PinState::new(fallback, 12);
        assert_eq!(pin.marker(), fallback);

        pin.render(Some(Coordinates::new(5.0, 6.0)));
        assert_eq!(pin.marker(), Coordinates::new(5.0, 6.0));
        assert_eq!(pin.center(), Coordinates::new(5.0, 6.0));

        pin.render(Some(Coordinates::default()));
        assert_eq!(pin.marker(), fallback);

        pin.render(None);
        assert_eq!(pin.center(), fallback);
    }

    #[test]
    fn test_pin_state_ignores_invalid_pick() {
        let mut pin = PinState::new(Coordinates::new(1.0, 2.0), 12);
        assert_eq!(pin.handle(MapEvent::Click(Coordinates::new(95.0, 0.0))), None);
        assert_eq!(pin.marker(), Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn test_get_picker() {
        let config = Config::default();
        assert_eq!(get_picker("mapbox", &config).name(), "mapbox");
        assert_eq!(get_picker("Google", &config).name(), "google");
        assert_eq!(get_picker("openlayers", &config).name(), "openlayers");
        assert_eq!(get_picker("unknown", &config).name(), "openlayers");
    }

    #[test]
    fn test_every_picker_honours_the_contract() {
        let config = Config::default();
        for name in available_pickers() {
            let mut picker = get_picker(name, &config);

            let picked = picker.handle(MapEvent::Click(Coordinates::new(5.0, 6.0)));
            assert_eq!(picked, Some(Coordinates::new(5.0, 6.0)), "{}", name);
            assert_eq!(picker.marker(), Coordinates::new(5.0, 6.0), "{}", name);

            let dragged = picker.handle(MapEvent::DragEnd(Coordinates::new(-7.5, 8.25)));
            assert_eq!(dragged, Some(Coordinates::new(-7.5, 8.25)), "{}", name);
            assert_eq!(picker.center(), Coordinates::new(-7.5, 8.25), "{}", name);

            picker.render(Some(Coordinates::new(48.8584, 2.2945)));
            assert_eq!(picker.marker(), Coordinates::new(48.8584, 2.2945), "{}", name);
            assert!(!picker.view_url().is_empty(), "{}", name);
        }
    }
}
