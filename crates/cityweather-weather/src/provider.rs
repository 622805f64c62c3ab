//! OpenWeatherMap current-weather client.

use std::sync::Arc;
use std::time::Duration;

use cityweather_i18n::Language;
use reqwest::{Client, StatusCode};
use tracing::instrument;

use crate::types::{WeatherError, WeatherReport};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// The provider is always queried in metric units.
const UNITS: &str = "metric";

/// OpenWeatherMap's code for an interface language.
/// See: https://openweathermap.org/current#multi
///
/// Languages the provider does not describe weather in get English.
pub fn provider_language(language: Language) -> &'static str {
    match language {
        Language::Zh => "zh_cn",
        Language::Ko => "kr",
        Language::En
        | Language::Ru
        | Language::Es
        | Language::Fr
        | Language::De
        | Language::Ar
        | Language::Fa
        | Language::Ja
        | Language::It
        | Language::Tr
        | Language::Pt
        | Language::Vi
        | Language::Id => language.code(),
        Language::Uz
        | Language::Kz
        | Language::Kg
        | Language::Tk
        | Language::Tg
        | Language::Ps => "en",
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl WeatherProvider {
    /// Requests that take longer than `timeout` are aborted and reported as
    /// [`WeatherError::Timeout`].
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch current conditions for `city`, with descriptions in `language`.
    ///
    /// `city` must already be trimmed and non-empty. No retries are made.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, city: &str, language: Language) -> Result<WeatherReport, WeatherError> {
        let lang = provider_language(language);
        tracing::debug!("Requesting weather for {:?} ({} -> {})", city, language, lang);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
                ("lang", lang),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }
        if !status.is_success() {
            let message = status.canonical_reason().unwrap_or("unknown status").to_string();
            tracing::warn!("Weather API returned {} for {:?}", status, city);
            return Err(WeatherError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let report = WeatherReport::from_json(&body)?;

        tracing::info!(
            "Fetched weather for {} ({:.1}, {}%)",
            report.city,
            report.temperature,
            report.humidity
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_language_special_cases() {
        assert_eq!(provider_language(Language::Zh), "zh_cn");
        assert_eq!(provider_language(Language::Ko), "kr");
    }

    #[test]
    fn test_provider_language_passthrough() {
        for lang in [Language::En, Language::Ru, Language::Ar, Language::Vi, Language::Id] {
            assert_eq!(provider_language(lang), lang.code());
        }
    }

    #[test]
    fn test_unsupported_provider_languages_use_english() {
        for lang in [
            Language::Uz,
            Language::Kz,
            Language::Kg,
            Language::Tk,
            Language::Tg,
            Language::Ps,
        ] {
            assert_eq!(provider_language(lang), "en");
        }
    }

    #[test]
    fn test_new_keeps_timeout() {
        let provider = WeatherProvider::new(DEFAULT_BASE_URL, "key", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(provider.timeout(), Duration::from_secs(8));
    }
}
