//! Result panel rendering.

use cityweather_i18n::{TextKey, TranslationBundle};
use cityweather_weather::{MapEmbed, WeatherError, WeatherReport};

use crate::view::{IconView, MapView, RenderedWeather, ResultPanel, ViewState};

/// Fixed edge length of the weather icon
pub const ICON_SIZE_PX: u32 = 100;

#[derive(Debug, Clone)]
pub struct Renderer {
    icon_base_url: String,
    map: MapEmbed,
}

impl Renderer {
    pub fn new(icon_base_url: impl Into<String>, map: MapEmbed) -> Self {
        Self {
            icon_base_url: icon_base_url.into(),
            map,
        }
    }

    pub fn render_weather(&self, report: &WeatherReport, bundle: &TranslationBundle) -> RenderedWeather {
        RenderedWeather {
            city: report.city.clone(),
            temperature: format!(
                "{:.1}{}",
                round_to_tenth(report.temperature),
                bundle.text(TextKey::Degree)
            ),
            humidity: format!("{} {}%", bundle.text(TextKey::Humidity), report.humidity),
            description: report.description.clone(),
            icon: IconView {
                url: report.icon_url(&self.icon_base_url),
                alt: report.description.clone(),
                width: ICON_SIZE_PX,
                height: ICON_SIZE_PX,
            },
            updated_at: report.fetched_at.format("%H:%M UTC").to_string(),
        }
    }

    /// Replace the panel with `report` and point the map at its location.
    pub fn show_weather(&self, view: &mut ViewState, report: &WeatherReport, bundle: &TranslationBundle) {
        view.panel = ResultPanel::Weather(self.render_weather(report, bundle));
        view.map = MapView {
            visible: true,
            src: Some(self.map.url(report.coordinates)),
            bbox: Some(self.map.bounding_box(report.coordinates)),
        };
    }

    /// Replace the panel with a single message. The map is left alone.
    pub fn show_error(&self, view: &mut ViewState, message: impl Into<String>) {
        view.panel = ResultPanel::Error(message.into());
    }

    /// Localized text for a failed lookup.
    pub fn error_message(&self, error: &WeatherError, bundle: &TranslationBundle) -> String {
        match error {
            WeatherError::CityNotFound(city) => bundle.city_not_found(city),
            WeatherError::Timeout => bundle.text(TextKey::ErrorTimeout).to_string(),
            WeatherError::Provider { .. } | WeatherError::Network(_) | WeatherError::Parse(_) => {
                bundle.text(TextKey::ErrorFetch).to_string()
            }
        }
    }
}

/// Halves round away from zero, so `18.25` shows as `18.3`.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new("https://openweathermap.org/img/wn", MapEmbed::default())
    }
}
