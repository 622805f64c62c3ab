//! Presentation state. Front ends draw these values; nothing here performs I/O.

use cityweather_i18n::{Language, TextDirection, TextKey, TranslationBundle};
use cityweather_weather::BoundingBox;

/// Static interface text derived from the applied bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceText {
    pub title: String,
    pub document_title: String,
    pub placeholder: String,
    pub language_label: String,
    /// Accessibility text of the language selector
    pub language_aria: String,
    /// Value shown by the language selector
    pub selected: Language,
    pub direction: TextDirection,
}

impl InterfaceText {
    pub fn from_bundle(bundle: &TranslationBundle, language: Language) -> Self {
        let title = bundle.text(TextKey::Title).to_string();
        Self {
            document_title: title.clone(),
            title,
            placeholder: bundle.text(TextKey::Placeholder).to_string(),
            language_label: bundle.text(TextKey::LanguageLabel).to_string(),
            language_aria: bundle.text(TextKey::LanguageAria).to_string(),
            selected: language,
            direction: language.direction(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

impl SubmitControl {
    pub fn idle(bundle: &TranslationBundle) -> Self {
        Self {
            enabled: true,
            label: bundle.text(TextKey::Button).to_string(),
        }
    }

    pub fn busy(bundle: &TranslationBundle) -> Self {
        Self {
            enabled: false,
            label: bundle.text(TextKey::Loading).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconView {
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

/// A successful lookup, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedWeather {
    pub city: String,
    /// e.g. `18.4°C`
    pub temperature: String,
    /// e.g. `Humidity: 60%`
    pub humidity: String,
    pub description: String,
    pub icon: IconView,
    /// When the report was fetched, e.g. `14:05 UTC`
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultPanel {
    #[default]
    Hidden,
    Weather(RenderedWeather),
    Error(String),
}

impl ResultPanel {
    pub fn is_visible(&self) -> bool {
        !matches!(self, ResultPanel::Hidden)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResultPanel::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn weather(&self) -> Option<&RenderedWeather> {
        match self {
            ResultPanel::Weather(weather) => Some(weather),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapView {
    pub visible: bool,
    /// Embed URL the map frame points at
    pub src: Option<String>,
    pub bbox: Option<BoundingBox>,
}

/// Everything a front end needs to draw the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub interface: InterfaceText,
    pub submit: SubmitControl,
    pub panel: ResultPanel,
    pub map: MapView,
}

impl ViewState {
    pub fn new(bundle: &TranslationBundle, language: Language) -> Self {
        Self {
            interface: InterfaceText::from_bundle(bundle, language),
            submit: SubmitControl::idle(bundle),
            panel: ResultPanel::Hidden,
            map: MapView::default(),
        }
    }
}
