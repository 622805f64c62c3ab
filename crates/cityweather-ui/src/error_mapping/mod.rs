//! Maps session errors to cityweather_core::AppError for consistent user-facing messages.
//! Each source crate has its own module to keep mappings small and readable.

mod language;
mod weather;

use cityweather_core::AppError;

use crate::error::SessionError;

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Weather(e) => weather::to_app_error(e),
            SessionError::Language(e) => language::to_app_error(e),
        }
    }
}
