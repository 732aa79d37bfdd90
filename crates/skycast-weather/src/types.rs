use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Geographic query location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Reject non-finite or out-of-range coordinates before any network
    /// call is attempted. NaN fails both range comparisons and is caught
    /// by the finiteness check first for a clearer message.
    pub fn validate(&self) -> Result<(), WeatherError> {
        if !self.latitude.is_finite() {
            return Err(WeatherError::InvalidCoordinate(format!(
                "latitude must be a finite number, got {}",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() {
            return Err(WeatherError::InvalidCoordinate(format!(
                "longitude must be a finite number, got {}",
                self.longitude
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(WeatherError::InvalidCoordinate(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(WeatherError::InvalidCoordinate(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Current conditions summary, normalized from the provider's `main` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
}

/// One entry of the provider's `weather` description block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDescription {
    /// Condition group, e.g. "Rain" or "Clouds"
    pub group: String,
    /// Human-readable description, e.g. "light rain"
    pub description: String,
    /// Provider icon id, e.g. "10d"
    pub icon: String,
}

/// Normalized weather result returned to callers.
///
/// A report is only constructed when both the conditions block and at
/// least one description are present; callers never see a partial state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub coordinate: Coordinate,
    pub conditions: CurrentConditions,
    pub descriptions: Vec<ConditionDescription>,
    /// Station or place name when the provider reports one
    pub station_name: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Raw provider payload, shaped after the OpenWeatherMap current-weather
/// response. Both `main` and `weather` are optional at the serde level so
/// their absence becomes a validation error instead of a decode error.
#[derive(Debug, Deserialize)]
pub(crate) struct ProviderResponse {
    pub main: Option<ProviderConditions>,
    #[serde(default)]
    pub weather: Vec<ProviderDescription>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProviderConditions {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProviderDescription {
    pub main: String,
    pub description: String,
    pub icon: String,
}

impl ProviderResponse {
    /// Validate the two required blocks and normalize into a report.
    /// Missing either block is a data-format failure, not a partial
    /// success.
    pub(crate) fn into_report(self, coordinate: Coordinate) -> Result<WeatherReport, WeatherError> {
        let main = self.main.ok_or_else(|| {
            WeatherError::MalformedResponse("response is missing the 'main' conditions block".into())
        })?;

        if self.weather.is_empty() {
            return Err(WeatherError::MalformedResponse(
                "response is missing the 'weather' description block".into(),
            ));
        }

        Ok(WeatherReport {
            coordinate,
            conditions: CurrentConditions {
                temperature: main.temp,
                feels_like: main.feels_like,
                humidity: main.humidity,
                pressure: main.pressure,
            },
            descriptions: self
                .weather
                .into_iter()
                .map(|w| ConditionDescription {
                    group: w.main,
                    description: w.description,
                    icon: w.icon,
                })
                .collect(),
            station_name: self.name,
            fetched_at: Utc::now(),
        })
    }
}
