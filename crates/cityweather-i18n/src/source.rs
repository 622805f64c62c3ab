//! Where translation bundles come from.
//!
//! `BundleSource` wraps the embedded, directory and HTTP backends behind one
//! async `fetch`, in the same way the note client wraps its storage backends.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::instrument;

use crate::bundle::TranslationBundle;
use crate::embedded;
use crate::error::LanguageError;
use crate::language::Language;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub enum BundleSource {
    /// Resources compiled into the binary.
    Embedded,

    /// `<dir>/<code>.json` on the local filesystem.
    Directory(PathBuf),

    /// `<base_url>/<code>.json` over HTTP.
    Http { client: Client, base_url: String },
}

impl BundleSource {
    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        Self::Directory(dir.into())
    }

    pub fn http(base_url: &str) -> Result<Self, LanguageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self::Http {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch and parse the resource for `language`. Every call goes to the
    /// backend; caching is the loader's job.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(&self, language: Language) -> Result<TranslationBundle, LanguageError> {
        match self {
            Self::Embedded => TranslationBundle::from_json(language, embedded::resource(language)),
            Self::Directory(dir) => Self::fetch_file(dir, language).await,
            Self::Http { client, base_url } => Self::fetch_http(client, base_url, language).await,
        }
    }

    async fn fetch_file(dir: &Path, language: Language) -> Result<TranslationBundle, LanguageError> {
        let path = dir.join(format!("{}.json", language.code()));

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LanguageError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        TranslationBundle::from_json(language, &contents)
    }

    async fn fetch_http(
        client: &Client,
        base_url: &str,
        language: Language,
    ) -> Result<TranslationBundle, LanguageError> {
        let url = format!("{}/{}.json", base_url, language.code());
        tracing::debug!("Fetching language file {}", url);

        let response = client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LanguageError::NotFound(url));
        }
        if !status.is_success() {
            return Err(LanguageError::Status {
                code: language.code().to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        TranslationBundle::from_json(language, &body)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Embedded => "embedded",
            Self::Directory(_) => "directory",
            Self::Http { .. } => "http",
        }
    }
}

impl std::fmt::Debug for BundleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => f.debug_tuple("BundleSource::Embedded").finish(),
            Self::Directory(dir) => f.debug_tuple("BundleSource::Directory").field(dir).finish(),
            Self::Http { base_url, .. } => {
                f.debug_tuple("BundleSource::Http").field(base_url).finish()
            }
        }
    }
}
