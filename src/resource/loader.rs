//! Sources of raw resource bundles.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::document::{self, DocumentError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("resource not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read resource '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse resource '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: DocumentError,
    },
}

/// Inserts `_{suffix}` before the extension of `filename`.
///
/// The extension starts at the last `.` anywhere in the name. Without a `.`
/// the suffix is appended directly, with no separator.
///
/// ```
/// use i18n_resources::append_suffix;
///
/// assert_eq!(append_suffix("strings.json", "en"), "strings_en.json");
/// assert_eq!(append_suffix("strings", "en"), "stringsen");
/// ```
pub fn append_suffix(filename: &str, suffix: &str) -> String {
    match filename.rfind('.') {
        Some(dot) => format!("{}_{}{}", &filename[..dot], suffix, &filename[dot..]),
        None => format!("{filename}{suffix}"),
    }
}

/// Produces raw bundles by name.
///
/// `Ok(None)` means the source has nothing for that name and is not an error.
pub trait ResourceLoader: Send + Sync + std::fmt::Debug {
    fn load(&self, name: &str) -> Result<Option<Value>, LoadError>;
}

/// Reads bundles from files below a root directory.
///
/// `.toml` files are parsed as TOML, everything else as JSON.
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceLoader for FileLoader {
    fn load(&self, name: &str) -> Result<Option<Value>, LoadError> {
        let path = self.root.join(name);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(path));
            }
            Err(e) => return Err(LoadError::ReadError { path, source: e }),
        };

        let value = document::parse(&path, &contents)
            .map_err(|e| LoadError::ParseError { path: path.clone(), source: e })?;
        tracing::debug!(path = %path.display(), "loaded resource file");
        Ok(Some(value))
    }
}

/// Serves bundles registered in memory, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    bundles: HashMap<String, Value>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bundle(mut self, name: impl Into<String>, bundle: Value) -> Self {
        self.insert(name, bundle);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, bundle: Value) {
        self.bundles.insert(name.into(), bundle);
    }
}

impl ResourceLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<Option<Value>, LoadError> {
        Ok(self.bundles.get(name).cloned())
    }
}
