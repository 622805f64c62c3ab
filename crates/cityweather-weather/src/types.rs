use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions for one city, as shown in the result panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    /// Degrees Celsius (the provider is always queried in metric units)
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: u8,
    pub description: String,
    /// Provider icon identifier, e.g. `01d`
    pub icon: String,
    pub coordinates: Coordinates,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReport {
    /// Parse a provider payload.
    ///
    /// `name`, `main.temp`, `main.humidity` and at least one `weather` entry
    /// are required; a missing `coord` is treated as `(0, 0)`.
    pub fn from_json(json: &str) -> Result<Self, WeatherError> {
        let payload: ApiResponse =
            serde_json::from_str(json).map_err(|e| WeatherError::Parse(e.to_string()))?;
        Self::try_from(payload)
    }

    /// `<base>/<icon>@2x.png`
    pub fn icon_url(&self, icon_base_url: &str) -> String {
        format!("{}/{}@2x.png", icon_base_url.trim_end_matches('/'), self.icon)
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    name: String,
    main: ApiMain,
    weather: Vec<ApiCondition>,
    #[serde(default)]
    coord: Option<Coordinates>,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: String,
    icon: String,
}

impl TryFrom<ApiResponse> for WeatherReport {
    type Error = WeatherError;

    fn try_from(payload: ApiResponse) -> Result<Self, Self::Error> {
        let condition = payload
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("weather array is empty".to_string()))?;

        Ok(Self {
            city: payload.name,
            temperature: payload.main.temp,
            humidity: payload.main.humidity,
            description: condition.description,
            icon: condition.icon,
            coordinates: payload.coord.unwrap_or_default(),
            fetched_at: Utc::now(),
        })
    }
}

/// Weather provider errors. Each submission ends in exactly one of these or a report.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City \"{0}\" not found")]
    CityNotFound(String),

    #[error("Weather API error: {status} {message}")]
    Provider { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            WeatherError::Timeout
        } else {
            WeatherError::Network(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = r#"{
        "coord": {"lon": 2.35, "lat": 48.85},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 18.4, "feels_like": 17.9, "humidity": 60},
        "name": "Paris",
        "cod": 200
    }"#;

    #[test]
    fn test_parse_full_payload() {
        let report = WeatherReport::from_json(PARIS).unwrap();
        assert_eq!(report.city, "Paris");
        assert_eq!(report.temperature, 18.4);
        assert_eq!(report.humidity, 60);
        assert_eq!(report.description, "clear sky");
        assert_eq!(report.icon, "01d");
        assert_eq!(report.coordinates, Coordinates { lat: 48.85, lon: 2.35 });
    }

    #[test]
    fn test_missing_coord_defaults_to_origin() {
        let json = r#"{"name": "X", "main": {"temp": 1.0, "humidity": 5},
                       "weather": [{"description": "mist", "icon": "50n"}]}"#;
        let report = WeatherReport::from_json(json).unwrap();
        assert_eq!(report.coordinates, Coordinates::default());
    }

    #[test]
    fn test_empty_weather_array_is_parse_error() {
        let json = r#"{"name": "X", "main": {"temp": 1.0, "humidity": 5}, "weather": []}"#;
        let err = WeatherReport::from_json(json).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(ref m) if m.contains("empty")));
    }

    #[test]
    fn test_missing_main_is_parse_error() {
        let json = r#"{"name": "X", "weather": [{"description": "d", "icon": "01d"}]}"#;
        assert!(matches!(WeatherReport::from_json(json), Err(WeatherError::Parse(_))));
    }

    #[test]
    fn test_icon_url() {
        let report = WeatherReport::from_json(PARIS).unwrap();
        assert_eq!(
            report.icon_url("https://openweathermap.org/img/wn/"),
            "https://openweathermap.org/img/wn/01d@2x.png"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(WeatherError::Timeout.to_string(), "Request timeout");
        assert!(WeatherError::CityNotFound("Paris".into()).to_string().contains("\"Paris\""));
    }
}
