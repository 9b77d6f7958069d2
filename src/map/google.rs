//! Google Maps picker (provider-hosted)
//!
//! The map itself is hosted by Google; the view URL opens it centered on
//! the marker.

use crate::constants::map::{DETAIL_ZOOM, HOSTED_FALLBACK};
use crate::location::Coordinates;
use crate::map::{MapEvent, MapPicker, PinState};

/// Google Maps picker
#[derive(Debug, Clone)]
pub struct GooglePicker {
    pin: PinState,
}

impl GooglePicker {
    pub fn new() -> Self {
        Self {
            pin: PinState::new(HOSTED_FALLBACK.into(), DETAIL_ZOOM),
        }
    }
}

impl Default for GooglePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl MapPicker for GooglePicker {
    fn name(&self) -> &'static str {
        "google"
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
            "https://www.google.com/maps/@{},{},{}z",
            marker.lat,
            marker.lng,
            self.pin.zoom()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_marker() {
        let picker = GooglePicker::new();
        assert_eq!(picker.marker(), Coordinates::new(13.067439, 80.237617));
        assert_eq!(picker.zoom(), 16);
    }

    #[test]
    fn test_southern_hemisphere_marker_is_kept() {
        let mut picker = GooglePicker::new();
        picker.render(Some(Coordinates::new(-33.8568, 151.2153)));
        assert_eq!(picker.marker(), Coordinates::new(-33.8568, 151.2153));
    }

    #[test]
    fn test_view_url() {
        let mut picker = GooglePicker::new();
        picker.handle(MapEvent::Click(Coordinates::new(40.7128, -74.006)));
        assert_eq!(picker.view_url(), "https://www.google.com/maps/@40.7128,-74.006,16z");
    }
}
