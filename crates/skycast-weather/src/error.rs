//! Weather-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Transport failure: {message}")]
    Transport {
        /// HTTP status code when the request completed with a
        /// non-success status; `None` for DNS/timeout/connection errors.
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl WeatherError {
    /// HTTP status attached to a transport failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Short tag for diagnostics, stable across message changes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCoordinate(_) => "invalid_coordinate",
            Self::Transport { .. } => "transport",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Configuration(_) => "configuration",
        }
    }

    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCoordinate(_) => "That location is not a valid coordinate.".to_string(),
            Self::Transport { status: Some(s), .. } if *s >= 500 => {
                "The weather service is experiencing issues. Please try again later.".to_string()
            }
            Self::Transport { status: Some(429), .. } => {
                "Too many weather requests. Please wait a moment.".to_string()
            }
            Self::Transport { .. } => {
                "Unable to reach the weather service. Check your connection.".to_string()
            }
            Self::MalformedResponse(_) => {
                "The weather service returned unexpected data. Please try again.".to_string()
            }
            Self::Configuration(_) => {
                "The weather service is not configured. Check your settings.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport {
                status: None,
                message: "request timed out".to_string(),
            }
        } else if err.is_connect() {
            Self::Transport {
                status: None,
                message: format!("connection failed: {}", err),
            }
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Transport {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        }
    }
}
