//! Location data model
//!
//! `Location` is the record persisted by the remote store, `LocationDraft`
//! is the form-local copy being edited, and `AddressCandidate` is a
//! geocoding result that has not been committed to a draft yet.
//!
//! Wire field names follow the store backend (`_id`, `NickName`, ...).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `0, 0` is the "not set yet" value of a fresh draft
    pub fn is_origin(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

impl std::str::FromStr for Coordinates {
    type Err = String;

    /// Parse "lat,lng"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("Expected LAT,LNG but got: {}", s))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| format!("Invalid latitude: {}", lat))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| format!("Invalid longitude: {}", lng))?;
        let coords = Self::new(lat, lng);
        coords.validate().map_err(|e| e.to_string())?;
        Ok(coords)
    }
}

/// A location persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "NickName", default)]
    pub nick_name: String,

    #[serde(rename = "Address", default)]
    pub address: String,

    #[serde(rename = "Latitude", default)]
    pub latitude: f64,

    #[serde(rename = "Longitude", default)]
    pub longitude: f64,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Any other fields the store sends along (`__v`, `City`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Location {
    /// The location's coordinate pair
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// String form of every field value, used by table search
    pub fn field_values(&self) -> Vec<String> {
        let mut values = vec![
            self.id.clone(),
            self.nick_name.clone(),
            self.address.clone(),
            self.latitude.to_string(),
            self.longitude.to_string(),
        ];
        values.extend(self.created_at.as_ref().map(format_timestamp));
        values.extend(self.updated_at.as_ref().map(format_timestamp));
        values.extend(self.extra.values().filter_map(|value| match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }));
        values
    }
}

/// Render a timestamp the way the store serializes it
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A form-local location that has not been persisted (or an edit copy)
///
/// Serializes to exactly the create/update payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationDraft {
    #[serde(rename = "NickName")]
    pub nick_name: String,

    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "Latitude")]
    pub latitude: f64,

    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl LocationDraft {
    /// The draft's coordinate pair
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Set both coordinates in one update
    pub fn set_coordinates(&mut self, coords: Coordinates) {
        self.latitude = coords.lat;
        self.longitude = coords.lng;
    }
}

impl From<&Location> for LocationDraft {
    fn from(location: &Location) -> Self {
        Self {
            nick_name: location.nick_name.clone(),
            address: location.address.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// A geocoding result offering an address and coordinate pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressCandidate {
    pub display_name: String,
    pub lat: f64,
    pub lng: f64,
}

impl AddressCandidate {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}
