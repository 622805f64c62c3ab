//! Translation bundles: one language's key → text mapping with built-in
//! English defaults for every recognized key.

use std::collections::HashMap;

use crate::error::LanguageError;
use crate::language::Language;

/// Interface strings the application looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Title,
    Placeholder,
    Button,
    Loading,
    Humidity,
    Degree,
    ErrorEmpty,
    ErrorFetch,
    ErrorNotFound,
    ErrorTimeout,
    LanguageLabel,
    LanguageAria,
}

impl TextKey {
    pub const ALL: [TextKey; 12] = [
        TextKey::Title,
        TextKey::Placeholder,
        TextKey::Button,
        TextKey::Loading,
        TextKey::Humidity,
        TextKey::Degree,
        TextKey::ErrorEmpty,
        TextKey::ErrorFetch,
        TextKey::ErrorNotFound,
        TextKey::ErrorTimeout,
        TextKey::LanguageLabel,
        TextKey::LanguageAria,
    ];

    /// Key as it appears in the resource files
    pub fn key(&self) -> &'static str {
        match self {
            TextKey::Title => "title",
            TextKey::Placeholder => "placeholder",
            TextKey::Button => "button",
            TextKey::Loading => "loading",
            TextKey::Humidity => "humidity",
            TextKey::Degree => "degree",
            TextKey::ErrorEmpty => "errorEmpty",
            TextKey::ErrorFetch => "errorFetch",
            TextKey::ErrorNotFound => "errorNotFound",
            TextKey::ErrorTimeout => "errorTimeout",
            TextKey::LanguageLabel => "label.lang",
            TextKey::LanguageAria => "aria.selectLanguage",
        }
    }

    pub fn default_text(&self) -> &'static str {
        match self {
            TextKey::Title => "Weather",
            TextKey::Placeholder => "Enter city name",
            TextKey::Button => "Get Weather",
            TextKey::Loading => "Loading...",
            TextKey::Humidity => "Humidity:",
            TextKey::Degree => "°C",
            TextKey::ErrorEmpty => "Please enter a city name.",
            TextKey::ErrorFetch => "Could not fetch weather data",
            TextKey::ErrorNotFound => "City \"{city}\" not found. Please check the spelling.",
            TextKey::ErrorTimeout => "Request took too long. Please try again.",
            TextKey::LanguageLabel => "Lang:",
            TextKey::LanguageAria => "Select language",
        }
    }
}

/// Placeholder substituted by [`TranslationBundle::city_not_found`].
const CITY_PLACEHOLDER: &str = "{city}";

/// Localized strings for one language. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationBundle {
    language: Language,
    entries: HashMap<String, String>,
}

impl TranslationBundle {
    /// A bundle with no entries: every lookup yields the English default.
    pub fn builtin(language: Language) -> Self {
        Self {
            language,
            entries: HashMap::new(),
        }
    }

    /// Parse a JSON resource. The top level must be an object; entries whose
    /// value is not a string are skipped.
    pub fn from_json(language: Language, json: &str) -> Result<Self, LanguageError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| LanguageError::Malformed {
                code: language.code().to_string(),
                reason: e.to_string(),
            })?;

        let serde_json::Value::Object(map) = value else {
            return Err(LanguageError::Malformed {
                code: language.code().to_string(),
                reason: "top level is not an object".to_string(),
            });
        };

        let entries = map
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(text) => Some((key, text)),
                other => {
                    tracing::debug!("Skipping non-string entry {:?} in {}: {}", key, language, other);
                    None
                }
            })
            .collect();

        Ok(Self { language, entries })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Raw entry lookup; empty strings count as missing.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Localized text for `key`, or its English default.
    pub fn text(&self, key: TextKey) -> &str {
        self.get(key.key()).unwrap_or_else(|| key.default_text())
    }

    /// "City not found" message naming `city`.
    pub fn city_not_found(&self, city: &str) -> String {
        self.text(TextKey::ErrorNotFound).replace(CITY_PLACEHOLDER, city)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
