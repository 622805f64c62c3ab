//! Resolve a requested language code to a translation bundle.
//!
//! Bundles are cached for the lifetime of the loader and never evicted. A
//! failed load is retried once with the default language; there is no
//! fallback beyond that.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::bundle::TranslationBundle;
use crate::error::LanguageError;
use crate::language::Language;
use crate::source::BundleSource;

/// Result of a successful [`LanguageLoader::load`].
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Language whose bundle was obtained
    pub language: Language,
    pub bundle: Arc<TranslationBundle>,
    /// No source access happened
    pub from_cache: bool,
    /// The requested language failed and the default was used instead
    pub fell_back: bool,
}

#[derive(Debug)]
pub struct LanguageLoader {
    source: BundleSource,
    cache: Mutex<HashMap<Language, Arc<TranslationBundle>>>,
}

impl LanguageLoader {
    pub fn new(source: BundleSource) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &BundleSource {
        &self.source
    }

    pub fn cached(&self, language: Language) -> Option<Arc<TranslationBundle>> {
        self.cache.lock().get(&language).cloned()
    }

    pub fn cached_languages(&self) -> Vec<Language> {
        let mut languages: Vec<_> = self.cache.lock().keys().copied().collect();
        languages.sort_by_key(|l| l.code());
        languages
    }

    /// Load the bundle for `code`.
    ///
    /// Unsupported codes resolve to the default language. Attempts are the
    /// resolved language, then the default if they differ; the first cached
    /// or successfully fetched bundle wins.
    pub async fn load(&self, code: &str) -> Result<LoadOutcome, LanguageError> {
        let resolved = Language::resolve(code);
        let fallback = (resolved != Language::DEFAULT).then_some(Language::DEFAULT);

        let mut last_error: Option<LanguageError> = None;

        for (attempt, language) in std::iter::once(resolved).chain(fallback).enumerate() {
            let fell_back = attempt > 0;

            if let Some(bundle) = self.cached(language) {
                tracing::debug!("Using cached bundle for {}", language);
                return Ok(LoadOutcome {
                    language,
                    bundle,
                    from_cache: true,
                    fell_back,
                });
            }

            match self.source.fetch(language).await {
                Ok(bundle) => {
                    let bundle = self
                        .cache
                        .lock()
                        .entry(language)
                        .or_insert_with(|| Arc::new(bundle))
                        .clone();

                    tracing::info!(
                        "Loaded {} translation bundle for {} ({} entries)",
                        self.source.kind(),
                        language,
                        bundle.len()
                    );

                    return Ok(LoadOutcome {
                            language,
                        bundle,
                        from_cache: false,
                        fell_back,
                    });
                }
                Err(e) => {
                    tracing::warn!("Failed to load language {}: {}", language, e);
                    last_error = Some(e);
                }
            }
        }

        Err(LanguageError::Unavailable {
            requested: code.to_string(),
            reason: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempt was made".to_string()),
        })
    }
}
