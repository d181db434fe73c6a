use std::path::PathBuf;
use thiserror::Error;

use crate::document::DocumentError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required settings file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: DocumentError,
    },

    #[error("failed to deserialize settings: {0}")]
    DeserializeError(#[from] serde_json::Error),
}
