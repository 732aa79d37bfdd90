//! Weather provider client: one GET per query, validate, normalize.

use std::time::Duration;

use tracing::instrument;

use skycast_core::config::{Units, WeatherConfig};

use crate::error::WeatherError;
use crate::types::{Coordinate, ProviderResponse, WeatherReport};

#[derive(Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    api_key: String,
    units: Units,
    endpoint: String,
}

// Hand-written so the credential never leaks through `{:?}` formatting.
impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("endpoint", &self.endpoint)
            .field("units", &self.units)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl WeatherClient {
    /// Build a client from an already-resolved configuration.
    ///
    /// The credential is verified here so that a misconfigured process
    /// fails at construction, never on the first request.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        if config.api_key.trim().is_empty() {
            return Err(WeatherError::Configuration(
                "weather API key is not configured".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            units: config.units,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Fetch current weather for a coordinate.
    ///
    /// Stateless pipeline: validate input, issue a single GET, check the
    /// status, validate the payload shape, normalize. No caching and no
    /// automatic retries; concurrent calls are independent.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_weather(&self, coordinate: Coordinate) -> Result<WeatherReport, WeatherError> {
        coordinate
            .validate()
            .map_err(|e| log_failure(coordinate, e))?;

        // The key is a query parameter; never log this URL.
        let url = format!(
            "{}?lat={}&lon={}&units={}&appid={}",
            self.endpoint,
            coordinate.latitude,
            coordinate.longitude,
            self.units.as_query_param(),
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| log_failure(coordinate, WeatherError::from(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(log_failure(
                coordinate,
                WeatherError::Transport {
                    status: Some(status.as_u16()),
                    message: format!("{}: {}", status, body),
                },
            ));
        }

        let payload: ProviderResponse = response
            .json()
            .await
            .map_err(|e| log_failure(coordinate, WeatherError::MalformedResponse(e.to_string())))?;

        let report = payload
            .into_report(coordinate)
            .map_err(|e| log_failure(coordinate, e))?;

        tracing::debug!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "Fetched weather: {}",
            report.descriptions[0].description
        );
        Ok(report)
    }
}

/// Emit the failure diagnostic with the input coordinate attached. The
/// credential never appears in these records.
fn log_failure(coordinate: Coordinate, err: WeatherError) -> WeatherError {
    tracing::warn!(
        latitude = coordinate.latitude,
        longitude = coordinate.longitude,
        kind = err.kind(),
        "Weather fetch failed: {}",
        err
    );
    err
}
