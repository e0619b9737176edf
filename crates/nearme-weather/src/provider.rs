use nearme_core::{Coordinate, Secret, WeatherConfig};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::types::{CurrentWeatherResponse, WeatherError, WeatherSnapshot};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("NearMe/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<Secret>,
}

impl WeatherProvider {
    /// # Errors
    /// Fails only if the HTTP client cannot be built.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        if config.api_key.is_none() {
            tracing::warn!("Weather API key not configured; requests will be rejected");
        }

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch current conditions for `coordinate`. One request, no retry.
    ///
    /// # Errors
    /// `NotFound` on a non-success status, `Network` when the request or body
    /// transfer fails, `Parse` when the body is not what we expect.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, coordinate: &Coordinate) -> Result<WeatherSnapshot, WeatherError> {
        let mut query = vec![
            ("latitude", coordinate.latitude().to_string()),
            ("longitude", coordinate.longitude().to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("appid", key.expose().to_string()));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Weather provider returned status {}", status);
            return Err(WeatherError::NotFound {
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.without_url()))?;
        let body: CurrentWeatherResponse =
            serde_json::from_str(&text).map_err(|e| WeatherError::Parse(e.to_string()))?;
        let snapshot = WeatherSnapshot::from_response(body)?;

        tracing::debug!(
            "Weather: {} at {}°C",
            snapshot.description,
            snapshot.display_temperature()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> WeatherProvider {
        let config = WeatherConfig {
            base_url: format!("{}/data/2.5/weather", server.uri()),
            api_key: Some(Secret::new("test-key")),
        };
        WeatherProvider::new(&config).unwrap()
    }

    fn body() -> serde_json::Value {
        serde_json::json!({
            "weather": [{"description": "scattered clouds"}],
            "main": {"temp": 300.0}
        })
    }

    #[tokio::test]
    async fn test_fetch_sends_coordinate_and_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("latitude", "40"))
            .and(query_param("longitude", "-74"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let coordinate = Coordinate::new(40.0, -74.0).unwrap();
        let snapshot = provider.fetch(&coordinate).await.unwrap();

        assert_eq!(snapshot.description, "scattered clouds");
        assert_eq!(snapshot.display_temperature(), "26.85");
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let coordinate = Coordinate::new(1.0, 2.0).unwrap();
        let result = provider.fetch(&coordinate).await;

        assert!(matches!(result, Err(WeatherError::NotFound { status: 401 })));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let coordinate = Coordinate::new(1.0, 2.0).unwrap();
        let result = provider.fetch(&coordinate).await;

        assert!(matches!(result, Err(WeatherError::Parse(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let config = WeatherConfig {
            base_url: "http://127.0.0.1:1/weather".to_string(),
            api_key: None,
        };
        let provider = WeatherProvider::new(&config).unwrap();
        let coordinate = Coordinate::new(1.0, 2.0).unwrap();

        let result = provider.fetch(&coordinate).await;

        assert!(matches!(result, Err(WeatherError::Network(_))));
    }
}
