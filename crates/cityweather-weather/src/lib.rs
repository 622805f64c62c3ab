//! Weather service for cityweather
//!
//! Fetches current conditions for a city from OpenWeatherMap, parses the
//! payload into a typed report, and frames the location for an embedded map.

pub mod map;
pub mod provider;
pub mod types;

pub use map::{BoundingBox, MapEmbed};
pub use provider::{provider_language, WeatherProvider, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use types::*;
