//! Runtime store for localized resource bundles.
//!
//! Bundles are nested key/value trees merged into a single resource tree and
//! read back by dotted key, with `{{param}}` interpolation and lazily
//! expanding node views over namespaces.

pub mod config;
pub mod context;
pub mod document;
mod error;
pub mod preference;
pub mod resource;

pub use config::{Config, ConfigError, Settings};
pub use context::{I18n, I18nBuilder, TextToken};
pub use error::Error;
pub use preference::{FilePreferences, MemoryPreferences, PreferenceError, PreferenceStore};
pub use resource::{
    append_suffix, format_text, FacadeNode, FacadeValue, FileLoader, LanguagePolicy, LoadError,
    MemoryLoader, MergePolicy, ResourceLoader, ResourceStore,
};
pub use serde_json::{json, Value};
