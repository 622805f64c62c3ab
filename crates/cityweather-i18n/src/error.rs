use thiserror::Error;

/// Failures while obtaining a translation bundle.
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("Language file not found: {0}")]
    NotFound(String),

    #[error("Language file {code} returned HTTP {status}")]
    Status { code: String, status: u16 },

    #[error("Malformed language file {code}: {reason}")]
    Malformed { code: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("No translation bundle available for {requested:?}: {reason}")]
    Unavailable { requested: String, reason: String },
}

/// Failures of the persisted preference store.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
