use cityweather_core::{AppError, NetworkError};
use cityweather_weather::WeatherError as ProviderError;

/// Only client construction reaches this mapping; lookup failures are
/// rendered from the bundle.
pub(super) fn to_app_error(e: ProviderError) -> AppError {
    AppError::Network(NetworkError::ClientSetup(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;

    #[test]
    fn test_client_error_maps_to_setup_failure() {
        let err: AppError = SessionError::from(ProviderError::Parse("bad builder".into())).into();
        assert!(matches!(err, AppError::Network(NetworkError::ClientSetup(ref m)) if m.contains("bad builder")));
        assert_eq!(err.user_message(), "Unable to set up network access. Please try again.");
    }
}
