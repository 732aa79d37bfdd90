use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the weather provider API key.
pub const API_KEY_VAR: &str = "SKYCAST_WEATHER_API_KEY";

/// Environment variable overriding the weather provider endpoint (optional).
pub const API_URL_VAR: &str = "SKYCAST_WEATHER_API_URL";

const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Unit system sent to the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Value of the provider's `units` query parameter.
    pub fn as_query_param(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
            Self::Standard => "standard",
        }
    }
}

/// Weather service configuration, resolved once at process start and
/// passed into the client constructor. Never read from the environment
/// after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather provider API key
    pub api_key: String,

    /// Weather provider endpoint URL
    pub endpoint: String,

    /// Unit system for temperature and wind values
    #[serde(default)]
    pub units: Units,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl WeatherConfig {
    /// Build a config with defaults for everything but the API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            units: Units::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Resolve configuration from the environment.
    ///
    /// Fails fast when the API key is absent or empty: no usable client
    /// can be constructed, so a misconfigured deployment dies at startup
    /// rather than on the first weather request.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;

        let endpoint = std::env::var(API_URL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let config = Self {
            api_key,
            endpoint,
            units: Units::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        };

        let validation = config.validate();
        if !validation.is_valid() {
            let summary = validation.error_summary();
            tracing::error!("Invalid weather configuration: {}", summary);
            return Err(ConfigError::Invalid(summary));
        }
        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.api_key.trim().is_empty() {
            result.add_error("api_key", "Weather API key must not be empty");
        } else if self.api_key.starts_with("YOUR_") {
            result.add_warning("api_key", "Weather API key looks like a placeholder");
        }

        self.validate_url(&self.endpoint, "endpoint", &mut result);

        if self.timeout_secs == 0 {
            result.add_error("timeout_secs", "Request timeout must be greater than 0");
        } else if self.timeout_secs > 120 {
            result.add_warning("timeout_secs", "Request timeout is unusually long (>120s)");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_from_env_missing_key_fails_fast() {
        // Single test owns this variable; set and unset in one place to
        // avoid racing with parallel tests.
        std::env::remove_var(API_KEY_VAR);
        let err = WeatherConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(v) if v == API_KEY_VAR));

        std::env::set_var(API_KEY_VAR, "abc123");
        let config = WeatherConfig::from_env().unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);

        // A present key but unusable endpoint still refuses to resolve.
        std::env::set_var(API_URL_VAR, "not-a-url");
        let err = WeatherConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("endpoint"));

        std::env::remove_var(API_URL_VAR);
        std::env::remove_var(API_KEY_VAR);
    }

    #[test]
    fn test_valid_config() {
        let config = WeatherConfig::new("abc123");
        let result = config.validate();
        assert!(result.is_valid(), "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_api_key_is_error() {
        let config = WeatherConfig::new("  ");
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "api_key"));
    }

    #[test]
    fn test_placeholder_api_key_is_warning() {
        let config = WeatherConfig::new("YOUR_API_KEY");
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "api_key"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = WeatherConfig::new("abc123");
        config.endpoint = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "endpoint"));
    }

    #[test]
    fn test_invalid_endpoint_scheme() {
        let mut config = WeatherConfig::new("abc123");
        config.endpoint = "ftp://weather.example.com".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = WeatherConfig::new("abc123");
        config.timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "timeout_secs"));
    }

    #[test]
    fn test_units_query_params() {
        assert_eq!(Units::Metric.as_query_param(), "metric");
        assert_eq!(Units::Imperial.as_query_param(), "imperial");
        assert_eq!(Units::Standard.as_query_param(), "standard");
    }

    #[test]
    fn test_units_default_is_metric() {
        assert_eq!(Units::default(), Units::Metric);
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
