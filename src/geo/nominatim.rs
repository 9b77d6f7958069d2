//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for address search and reverse lookup.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)

use crate::constants::api::{NOMINATIM_URL, USER_AGENT};
use crate::config::defaults::DEFAULT_SEARCH_LIMIT;
use crate::error::{Error, Result};
use crate::geo::GeoBackend;
use crate::location::AddressCandidate;
use serde::Deserialize;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
    limit: usize,
}

/// Nominatim search/reverse response item
///
/// Reverse lookups with no match come back as `{"error": "..."}` with a 200.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: Option<String>,
    lon: Option<String>,
    display_name: Option<String>,
    error: Option<String>,
}

impl NominatimBackend {
    /// Create a backend against the public Nominatim instance
    pub fn new() -> Result<Self> {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Create a backend against a specific Nominatim instance
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit: DEFAULT_SEARCH_LIMIT,
        })
    }

    /// Limit the number of search candidates
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> Result<(f64, f64)> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Geocoding(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Geocoding(format!("Invalid longitude: {}", lng)))?;
        Ok((lat, lng))
    }

    fn into_candidate(result: NominatimResult) -> Result<Option<AddressCandidate>> {
        match (result.lat, result.lon, result.display_name) {
            (Some(lat), Some(lon), Some(display_name)) => {
                let (lat, lng) = Self::parse_coords(&lat, &lon)?;
                Ok(Some(AddressCandidate {
                    display_name,
                    lat,
                    lng,
                }))
            }
            _ => Ok(None),
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        debug!(%url, "nominatim request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

impl GeoBackend for NominatimBackend {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn search_address(&self, text: &str) -> Result<Vec<AddressCandidate>> {
        let url = format!(
            "{}/search?q={}&format=json&addressdetails=1&limit={}",
            self.base_url,
            urlencoding::encode(text),
            self.limit
        );

        let results: Vec<NominatimResult> = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        let mut candidates = Vec::with_capacity(results.len());
        for result in results {
            match Self::into_candidate(result) {
                Ok(Some(candidate)) => candidates.push(candidate),
                Ok(None) => {}
                Err(e) => debug!(error = %e, "skipping nominatim row"),
            }
        }
        Ok(candidates)
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Option<AddressCandidate>> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, lat, lng
        );

        let result: NominatimResult = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        if let Some(error) = &result.error {
            debug!(%error, lat, lng, "nominatim reverse lookup found nothing");
            return Ok(None);
        }

        Self::into_candidate(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coords() {
        let (lat, lng) = NominatimBackend::parse_coords("40.7128", "-74.0060").unwrap();
        assert!((lat - 40.7128).abs() < 0.0001);
        assert!((lng - (-74.0060)).abs() < 0.0001);
    }

    #[test]
    fn test_parse_coords_invalid() {
        assert!(NominatimBackend::parse_coords("invalid", "0").is_err());
        assert!(NominatimBackend::parse_coords("0", "invalid").is_err());
    }

    #[test]
    fn test_error_body_is_no_candidate() {
        let result: NominatimResult =
            serde_json::from_str(r#"{"error":"Unable to geocode"}"#).unwrap();
        assert!(NominatimBackend::into_candidate(result).unwrap().is_none());
    }

    #[test]
    fn test_limit_is_at_least_one() {
        let backend = NominatimBackend::new().unwrap().with_limit(0);
        assert_eq!(backend.limit, 1);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let backend = NominatimBackend::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(backend.base_url, "http://localhost:8080");
    }
}
