use cityweather_core::{AppError, LanguageError};
use cityweather_i18n::LanguageError as BundleError;

pub(super) fn to_app_error(e: BundleError) -> AppError {
    AppError::Language(LanguageError::Unavailable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;

    #[test]
    fn test_bundle_error_maps_to_unavailable() {
        let err: AppError = SessionError::from(BundleError::NotFound("lang/en.json".into())).into();
        assert!(
            matches!(err, AppError::Language(LanguageError::Unavailable(ref m)) if m.contains("en.json"))
        );
        assert_eq!(err.user_message(), "Translations are unavailable. Using current text.");
    }
}
