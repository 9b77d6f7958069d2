//! Google Geocoding backend
//!
//! Uses the Maps Platform Geocoding API. Requires an API key.

use crate::constants::api::{GOOGLE_GEOCODE_URL, USER_AGENT};
use crate::error::{Error, Result};
use crate::geo::GeoBackend;
use crate::location::AddressCandidate;
use serde::Deserialize;
use tracing::debug;

/// Google geocoding backend
#[derive(Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

// The key stays out of logs.
impl std::fmt::Debug for GoogleGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleGeocoder")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<GeocodeResult> for AddressCandidate {
    fn from(result: GeocodeResult) -> Self {
        Self {
            display_name: result.formatted_address,
            lat: result.geometry.location.lat,
            lng: result.geometry.location.lng,
        }
    }
}

impl GoogleGeocoder {
    /// Create a geocoder against the public API
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(GOOGLE_GEOCODE_URL, api_key)
    }

    /// Create a geocoder against a specific endpoint
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn query(&self, params: &[(&str, String)]) -> Result<Vec<AddressCandidate>> {
        debug!(base_url = %self.base_url, ?params, "google geocode request");

        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        query.push(("key", self.api_key.as_str()));

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Google geocode request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "Google geocode returned status: {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response.json().await.map_err(|e| {
            Error::Geocoding(format!("Failed to parse Google geocode response: {}", e))
        })?;

        Self::candidates(body)
    }

    fn candidates(body: GeocodeResponse) -> Result<Vec<AddressCandidate>> {
        match body.status.as_str() {
            "OK" => Ok(body.results.into_iter().map(AddressCandidate::from).collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            status => Err(Error::Geocoding(format!(
                "Google geocode failed: {}{}",
                status,
                body.error_message
                    .map(|m| format!(" ({})", m))
                    .unwrap_or_default()
            ))),
        }
    }
}

impl GeoBackend for GoogleGeocoder {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn search_address(&self, text: &str) -> Result<Vec<AddressCandidate>> {
        self.query(&[("address", text.to_string())]).await
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Option<AddressCandidate>> {
        let results = self.query(&[("latlng", format!("{},{}", lat, lng))]).await?;
        Ok(results.into_iter().next())
    }
}
