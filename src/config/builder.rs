use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::env::env_tree;
use super::ConfigError;
use crate::document;
use crate::resource::{merge, MergePolicy};

/// A settings source in the loading pipeline.
#[derive(Debug)]
enum ConfigSource {
    File { path: PathBuf, required: bool },
    Env { prefix: String, separator: String },
}

/// Builder for loading settings from files and environment variables.
///
/// Sources are merged in registration order with the same engine that merges
/// resource bundles, later sources overriding earlier ones. Objects merge by
/// key and arrays by index.
///
/// Files ending in `.toml` are read as TOML, any other file as JSON.
///
/// ## Example
///
/// ```no_run
/// use i18n_resources::{Config, Settings};
///
/// let settings: Settings = Config::builder()
///     .with_file("config/i18n.toml", true)
///     .with_file("config/i18n.local.toml", false)
///     .with_env("I18N", "__")
///     .build()?;
/// # Ok::<(), i18n_resources::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    sources: Vec<ConfigSource>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a settings file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(ConfigSource::File {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// Loads settings from environment variables with the given prefix.
    ///
    /// `I18N__DEFAULT_LANGUAGE=fr` with prefix `I18N` and separator `__`
    /// sets `default_language`. Values are coerced to bool, integer or
    /// float when they look like one, and kept as strings otherwise.
    pub fn with_env(mut self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.sources.push(ConfigSource::Env {
            prefix: prefix.into(),
            separator: separator.into(),
        });
        self
    }

    /// Loads and merges every source, then deserializes the result.
    pub fn build<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        let mut merged = Value::Object(Map::new());

        for source in self.sources {
            let layer = match source {
                ConfigSource::File { path, required } => {
                    load_config_file(&path, required)?.unwrap_or(Value::Null)
                }
                ConfigSource::Env { prefix, separator } => env_tree(&prefix, &separator),
            };
            merged = merge(merged, layer, MergePolicy::Override);
        }

        serde_json::from_value(merged).map_err(ConfigError::DeserializeError)
    }
}

/// Loads and parses a settings file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_config_file(path: &Path, required: bool) -> Result<Option<Value>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let value = document::parse(path, &contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
