//! The session context: one owned value holding everything the widget
//! mutates (current language, applied bundle, loading flag, last result and
//! view state), plus the collaborators that feed it.
//!
//! Operations take `&self`. The state mutex is only held between await
//! points, never across one.

use std::sync::Arc;
use std::time::Duration;

use cityweather_core::{AppError, BundleSourceKind, Config};
use cityweather_i18n::{
    initial_language_code, BundleSource, Language, LanguageLoader, PreferenceStore, TextKey,
    TranslationBundle,
};
use cityweather_weather::{MapEmbed, WeatherError, WeatherProvider, WeatherReport};
use parking_lot::Mutex;

use crate::error::SessionError;
use crate::render::Renderer;
use crate::view::{InterfaceText, SubmitControl, ViewState};

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty; nothing was requested.
    Rejected,
    /// A lookup was already in flight; nothing changed.
    Ignored,
    /// The weather result is on the panel.
    Shown,
    /// The lookup failed; an error message is on the panel.
    Failed(FailureKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Provider,
    Timeout,
    Network,
    Parse,
}

impl From<&WeatherError> for FailureKind {
    fn from(e: &WeatherError) -> Self {
        match e {
            WeatherError::CityNotFound(_) => FailureKind::NotFound,
            WeatherError::Provider { .. } => FailureKind::Provider,
            WeatherError::Timeout => FailureKind::Timeout,
            WeatherError::Network(_) => FailureKind::Network,
            WeatherError::Parse(_) => FailureKind::Parse,
        }
    }
}

/// How a language change ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageChange {
    Applied {
        language: Language,
        from_cache: bool,
        fell_back: bool,
    },
    /// A newer language request was made while this one was loading; the
    /// bundle was cached but not applied.
    Superseded { language: Language },
}

struct SessionState {
    language: Language,
    bundle: Arc<TranslationBundle>,
    loading: bool,
    last_result: Option<WeatherReport>,
    /// Ticket of the most recent language request
    language_ticket: u64,
    view: ViewState,
}

pub struct Session {
    provider: WeatherProvider,
    loader: LanguageLoader,
    preferences: PreferenceStore,
    renderer: Renderer,
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(
        provider: WeatherProvider,
        loader: LanguageLoader,
        preferences: PreferenceStore,
        renderer: Renderer,
    ) -> Self {
        let language = Language::DEFAULT;
        let bundle = Arc::new(TranslationBundle::builtin(language));
        let view = ViewState::new(&bundle, language);

        Self {
            provider,
            loader,
            preferences,
            renderer,
            state: Mutex::new(SessionState {
                language,
                bundle,
                loading: false,
                last_result: None,
                language_ticket: 0,
                view,
            }),
        }
    }

    /// Build a session from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let provider = WeatherProvider::new(
            &config.weather.base_url,
            &config.weather.api_key,
            Duration::from_millis(config.weather.timeout_ms),
        )
        .map_err(SessionError::from)?;

        let source = match config.i18n.source {
            BundleSourceKind::Embedded => BundleSource::Embedded,
            BundleSourceKind::Directory => BundleSource::directory(config.lang_directory()),
            BundleSourceKind::Http => {
                BundleSource::http(&config.i18n.base_url).map_err(SessionError::from)?
            }
        };

        let renderer = Renderer::new(
            config.weather.icon_base_url.clone(),
            MapEmbed::new(config.map.embed_base_url.clone(), config.map.margin_degrees),
        );

        tracing::info!(
            "Session configured ({} bundles, {}ms timeout)",
            source.kind(),
            config.weather.timeout_ms
        );

        Ok(Self::new(
            provider,
            LanguageLoader::new(source),
            PreferenceStore::file(config.preferences_path()),
            renderer,
        ))
    }

    /// Apply the startup language: stored preference, else system locale, else the default.
    pub async fn start(&self) -> Result<LanguageChange, SessionError> {
        let code = initial_language_code(&self.preferences);
        tracing::info!("Initial language: {}", code);
        self.change_language(&code).await
    }

    /// Resolve `code`, load its bundle and apply it.
    ///
    /// On success the interface text, selector and text direction follow the
    /// new language, the preference is persisted, and a previous weather
    /// result is re-rendered without a network call. If neither the requested
    /// nor the default bundle can be loaded, the interface is left untouched.
    pub async fn change_language(&self, code: &str) -> Result<LanguageChange, SessionError> {
        let ticket = {
            let mut state = self.state.lock();
            state.language_ticket += 1;
            state.language_ticket
        };

        let outcome = match self.loader.load(code).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Failed to load language {:?}: {}", code, e);
                return Err(e.into());
            }
        };

        {
            let mut guard = self.state.lock();
            let state = &mut *guard;

            if state.language_ticket != ticket {
                tracing::debug!(
                    "Language {} superseded by a newer request",
                    outcome.language
                );
                return Ok(LanguageChange::Superseded {
                    language: outcome.language,
                });
            }

            state.language = outcome.language;
            state.bundle = outcome.bundle;
            state.view.interface = InterfaceText::from_bundle(&state.bundle, state.language);
            state.view.submit = if state.loading {
                SubmitControl::busy(&state.bundle)
            } else {
                SubmitControl::idle(&state.bundle)
            };

            if let Some(report) = &state.last_result {
                self.renderer.show_weather(&mut state.view, report, &state.bundle);
            }
        }

        if let Err(e) = self.preferences.set_preferred_language(outcome.language) {
            tracing::warn!("Failed to persist language preference: {}", e);
        }

        tracing::info!("Applied language {}", outcome.language);
        Ok(LanguageChange::Applied {
            language: outcome.language,
            from_cache: outcome.from_cache,
            fell_back: outcome.fell_back,
        })
    }

    /// Look up the weather for `input`.
    ///
    /// Empty input shows the localized prompt and makes no request. A
    /// submission while another is in flight is ignored.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let city = input.trim();

        let language = {
            let mut guard = self.state.lock();
            let state = &mut *guard;

            if city.is_empty() {
                let message = state.bundle.text(TextKey::ErrorEmpty).to_string();
                self.renderer.show_error(&mut state.view, message);
                return SubmitOutcome::Rejected;
            }

            if state.loading {
                tracing::debug!("Ignoring submission for {:?}: a lookup is in flight", city);
                return SubmitOutcome::Ignored;
            }

            state.loading = true;
            state.view.submit = SubmitControl::busy(&state.bundle);
            state.language
        };

        let mut in_flight = InFlight::new(&self.state);
        let result = self.provider.fetch(city, language).await;
        in_flight.disarm();

        let mut guard = self.state.lock();
        let state = &mut *guard;

        let outcome = match result {
            Ok(report) => {
                self.renderer.show_weather(&mut state.view, &report, &state.bundle);
                state.last_result = Some(report);
                SubmitOutcome::Shown
            }
            Err(e) => {
                tracing::error!("Weather fetch error: {}", e);
                let message = self.renderer.error_message(&e, &state.bundle);
                self.renderer.show_error(&mut state.view, message);
                SubmitOutcome::Failed(FailureKind::from(&e))
            }
        };

        state.loading = false;
        state.view.submit = SubmitControl::idle(&state.bundle);
        outcome
    }

    /// Snapshot of the current view state.
    pub fn view(&self) -> ViewState {
        self.state.lock().view.clone()
    }

    pub fn language(&self) -> Language {
        self.state.lock().language
    }

    pub fn bundle(&self) -> Arc<TranslationBundle> {
        self.state.lock().bundle.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn last_result(&self) -> Option<WeatherReport> {
        self.state.lock().last_result.clone()
    }

    pub fn loader(&self) -> &LanguageLoader {
        &self.loader
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("language", &self.language())
            .field("loading", &self.is_loading())
            .field("source", self.loader.source())
            .finish()
    }
}

/// Clears the loading flag if a submission is dropped mid-request.
struct InFlight<'a> {
    state: &'a Mutex<SessionState>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a Mutex<SessionState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.loading = false;
        state.view.submit = SubmitControl::idle(&state.bundle);
        tracing::debug!("Weather lookup cancelled");
    }
}
