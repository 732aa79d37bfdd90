//! Configuration error types.
//!
//! These are fatal at startup: a process that cannot resolve its
//! required configuration refuses to construct a usable service rather
//! than deferring the failure to the first request.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable is not set: {0}")]
    MissingCredential(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// User-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::MissingCredential(_) => {
                "The weather API key is not configured. Check your environment."
            }
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}
