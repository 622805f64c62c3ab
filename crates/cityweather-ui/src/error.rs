use thiserror::Error;

/// Failures surfaced by [`crate::Session`] setup and language changes.
///
/// Weather lookup failures are not here: they end on the result panel as
/// localized text.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The weather HTTP client could not be built
    #[error(transparent)]
    Weather(#[from] cityweather_weather::WeatherError),

    #[error(transparent)]
    Language(#[from] cityweather_i18n::LanguageError),
}
