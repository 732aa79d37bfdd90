//! Weather service layer for Skycast
//!
//! Fetches current weather for a coordinate from the provider API,
//! validates the response shape, and returns a normalized report or a
//! typed error. Stateless per call: no caching, no retries.

pub mod client;
pub mod error;
pub mod types;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use types::{ConditionDescription, Coordinate, CurrentConditions, WeatherReport};
