//! HTTP location store
//!
//! REST/JSON client for `/api/v1/location`. Updates use `PUT`.

use crate::config::Config;
use crate::constants::api::LOCATION_PATH;
use crate::error::{Error, Result};
use crate::location::{Location, LocationDraft};
use crate::store::LocationStore;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

/// Store client over HTTP
#[derive(Debug, Clone)]
pub struct HttpLocationStore {
    client: reqwest::Client,
    collection_url: String,
}

/// `GET /api/v1/location` body
#[derive(Debug, Deserialize)]
struct ListResponse {
    result: Vec<Location>,
}

/// Create/update bodies come back either wrapped or bare
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SavedResponse {
    Wrapped { result: Location },
    Bare(Location),
}

impl HttpLocationStore {
    /// Create a client for the store at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client with a preconfigured `reqwest::Client`
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            collection_url: format!("{}{}", base_url.trim_end_matches('/'), LOCATION_PATH),
        }
    }

    /// Create a client for the configured store
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            collection_url: config.location_url(),
        }
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url, urlencoding::encode(id))
    }

    /// Map non-2xx statuses to errors
    fn check(response: reqwest::Response, action: &str, id: Option<&str>) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => Err(Error::NotFound(id.to_string())),
            _ => Err(Error::Store(format!("{} failed with status: {}", action, status))),
        }
    }

    async fn saved(response: reqwest::Response) -> Result<Option<Location>> {
        let body = response
            .text()
            .await
            .map_err(|e| Error::Store(format!("Failed to read store response: {}", e)))?;

        if body.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<SavedResponse>(&body) {
            Ok(SavedResponse::Wrapped { result }) | Ok(SavedResponse::Bare(result)) => {
                Ok(Some(result))
            }
            Err(e) => {
                debug!(error = %e, "store response is not a location");
                Ok(None)
            }
        }
    }
}

impl LocationStore for HttpLocationStore {
    async fn list(&self) -> Result<Vec<Location>> {
        debug!(url = %self.collection_url, "listing locations");

        let response = self
            .client
            .get(&self.collection_url)
            .send()
            .await
            .map_err(|e| Error::Store(format!("Failed to fetch data: {}", e)))?;

        let body: ListResponse = Self::check(response, "Fetching locations", None)?
            .json()
            .await
            .map_err(|e| Error::Store(format!("Failed to parse location list: {}", e)))?;

        Ok(body.result)
    }

    async fn create(&self, draft: &LocationDraft) -> Result<Option<Location>> {
        debug!(nick_name = %draft.nick_name, "creating location");

        let response = self
            .client
            .post(&self.collection_url)
            .json(draft)
            .send()
            .await
            .map_err(|e| Error::Store(format!("Create request failed: {}", e)))?;

        Self::saved(Self::check(response, "Creating location", None)?).await
    }

    async fn update(&self, id: &str, draft: &LocationDraft) -> Result<Option<Location>> {
        debug!(%id, nick_name = %draft.nick_name, "updating location");

        let response = self
            .client
            .put(self.item_url(id))
            .json(draft)
            .send()
            .await
            .map_err(|e| Error::Store(format!("Update request failed: {}", e)))?;

        Self::saved(Self::check(response, "Updating location", Some(id))?).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        debug!(%id, "deleting location");

        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(|e| Error::Store(format!("Delete request failed: {}", e)))?;

        Self::check(response, "Deleting location", Some(id))?;
        Ok(())
    }
}
