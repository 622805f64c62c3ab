//! Localization for cityweather
//!
//! Supported languages, translation bundles with English defaults, bundle
//! sources (embedded, directory, HTTP), a caching loader with one-level
//! fallback, and the persisted language preference.

pub mod bundle;
pub mod embedded;
pub mod error;
pub mod language;
pub mod loader;
pub mod preference;
pub mod source;

pub use bundle::{TextKey, TranslationBundle};
pub use error::{LanguageError, PreferenceError};
pub use language::{Language, TextDirection};
pub use loader::{LanguageLoader, LoadOutcome};
pub use preference::{initial_language_code, PreferenceStore, PREFERRED_LANG_KEY};
pub use source::BundleSource;
