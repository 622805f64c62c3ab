//! Centralized error types for the cityweather application.
//!
//! These cover the failures that happen outside a translation bundle's reach:
//! configuration, session setup and language loading. Weather lookup failures
//! are shown through the bundle and never reach this hierarchy.
//! Crate-level errors are mapped in by the UI crate.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Language error: {0}")]
    Language(#[from] LanguageError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Language(e) => e.user_message(),
        }
    }
}

/// Network-related errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ClientSetup(_) => "Unable to set up network access. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}

/// Translation errors.
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("No translation bundle could be loaded: {0}")]
    Unavailable(String),
}

impl LanguageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LanguageError::Unavailable(_) => "Translations are unavailable. Using current text.",
        }
    }
}
