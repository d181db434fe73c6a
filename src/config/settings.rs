use std::path::PathBuf;

use serde::Deserialize;

/// Runtime settings for an [`I18n`](crate::I18n) context.
///
/// Every field has a default, so an empty settings file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language active before any preference is read.
    pub default_language: String,
    /// Languages accepted by `set_language`. Empty accepts any identifier.
    pub allowed_languages: Vec<String>,
    /// Preference key holding the previously chosen language.
    pub preference_key: String,
    /// Directory the default file loader reads bundles from.
    pub resource_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_language: String::new(),
            allowed_languages: Vec::new(),
            preference_key: "language".to_string(),
            resource_dir: PathBuf::from("."),
        }
    }
}
