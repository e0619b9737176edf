//! Places text-search client.

use nearme_core::{Coordinate, PlacesConfig, Secret};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::types::{Place, PlacesError, SearchResponse};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("NearMe/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<Secret>,
    query: String,
}

impl PlacesClient {
    /// # Errors
    /// Fails only if the HTTP client cannot be built.
    pub fn new(config: &PlacesConfig) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        if config.api_key.is_none() {
            tracing::warn!("Places API key not configured; requests will be rejected");
        }

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            query: config.query.clone(),
        })
    }

    /// The category keyword this client searches for.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Venues matching the keyword that are open now, nearest first.
    ///
    /// # Errors
    /// `NotFound` on a non-success status, `Network` when the request or body
    /// transfer fails, `Parse` when the body is not what we expect.
    #[instrument(skip(self), level = "info")]
    pub async fn search_nearby(&self, coordinate: &Coordinate) -> Result<Vec<Place>, PlacesError> {
        let mut request = self.client.get(&self.base_url).query(&[
            ("query", self.query.as_str()),
            ("ll", coordinate.to_ll().as_str()),
            ("open_now", "true"),
            ("sort", "DISTANCE"),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", key.expose());
        }

        let response = request
            .send()
            .await
            .map_err(|e| PlacesError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Places provider returned status {}", status);
            return Err(PlacesError::NotFound {
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| PlacesError::Network(e.without_url()))?;
        let body: SearchResponse =
            serde_json::from_str(&text).map_err(|e| PlacesError::Parse(e.to_string()))?;

        tracing::debug!("Found {} places for '{}'", body.results.len(), self.query);
        Ok(body.results)
    }
}
