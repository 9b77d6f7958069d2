//! Geocoding module
//!
//! Forward address search (text to candidates) and reverse lookup
//! (coordinates to address) behind one trait, so the form can be wired to
//! any provider at composition time.

pub mod google;
pub mod nominatim;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::location::AddressCandidate;

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Provider name as used in config
    fn name(&self) -> &'static str;

    /// Search for addresses matching free text
    ///
    /// An empty result is not an error.
    fn search_address(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<AddressCandidate>>> + Send;

    /// Reverse geocode coordinates to an address
    fn reverse_geocode(
        &self,
        lat: f64,
        lng: f64,
    ) -> impl std::future::Future<Output = Result<Option<AddressCandidate>>> + Send;
}

/// A geocoder chosen from config
#[derive(Debug, Clone)]
pub enum Geocoder {
    Nominatim(nominatim::NominatimBackend),
    Google(google::GoogleGeocoder),
}

impl GeoBackend for Geocoder {
    fn name(&self) -> &'static str {
        match self {
            Self::Nominatim(g) => g.name(),
            Self::Google(g) => g.name(),
        }
    }

    async fn search_address(&self, text: &str) -> Result<Vec<AddressCandidate>> {
        match self {
            Self::Nominatim(g) => g.search_address(text).await,
            Self::Google(g) => g.search_address(text).await,
        }
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Option<AddressCandidate>> {
        match self {
            Self::Nominatim(g) => g.reverse_geocode(lat, lng).await,
            Self::Google(g) => g.reverse_geocode(lat, lng).await,
        }
    }
}

/// Names accepted by [`get_geocoder`]
pub fn available_geocoders() -> Vec<&'static str> {
    vec!["nominatim", "google"]
}

/// Build the geocoder named `name` (or the configured one)
pub fn get_geocoder(name: Option<&str>, config: &Config) -> Result<Geocoder> {
    let name = name.unwrap_or(&config.geocoder.provider);

    match name.to_lowercase().as_str() {
        "nominatim" => Ok(Geocoder::Nominatim(
            nominatim::NominatimBackend::with_base_url(&config.geocoder.nominatim_url)?
                .with_limit(config.geocoder.search_limit),
        )),
        "google" => {
            if config.api_keys.google.is_empty() {
                return Err(Error::Config(
                    "Google geocoding requires api_keys.google".to_string(),
                ));
            }
            Ok(Geocoder::Google(google::GoogleGeocoder::new(
                &config.api_keys.google,
            )?))
        }
        other => Err(Error::Config(format!("Unknown geocoder: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_geocoder_default_is_nominatim() {
        let geocoder = get_geocoder(None, &Config::default()).unwrap();
        assert_eq!(geocoder.name(), "nominatim");
    }

    #[test]
    fn test_google_requires_key() {
        let mut config = Config::default();
        assert!(get_geocoder(Some("google"), &config).is_err());

        config.api_keys.google = "key".to_string();
        let geocoder = get_geocoder(Some("Google"), &config).unwrap();
        assert_eq!(geocoder.name(), "google");
    }

    #[test]
    fn test_unknown_geocoder() {
        assert!(get_geocoder(Some("here"), &Config::default()).is_err());
    }

    #[test]
    fn test_candidate_serialization() {
        let candidate = AddressCandidate {
            lat: 40.7128,
            lng: -74.0060,
            display_name: "New York City".to_string(),
        };

        let json = serde_json::to_string(&candidate).unwrap();
        assert!(json.contains("displayName"));
        let parsed: AddressCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, candidate);
    }
}
