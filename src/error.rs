use crate::config::ConfigError;
use crate::preference::PreferenceError;
use thiserror::Error;

/// Top-level error type for the i18n-resources library.
///
/// Lookups never produce errors; only configuration, language changes and
/// preference writes can fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid language '{language}', expected one of {allowed:?}")]
    InvalidLanguage {
        language: String,
        allowed: Vec<String>,
    },

    #[error("preference error: {0}")]
    Preference(#[from] PreferenceError),
}
