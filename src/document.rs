//! Parsing of tree-structured text documents into resource trees.
//!
//! Bundles and settings files are either JSON or TOML. The format is picked
//! from the file extension; anything that is not `.toml` is read as JSON.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Document formats understood by the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Json,
        }
    }
}

/// Parses `contents` as a document in the format implied by `path`.
pub fn parse(path: &Path, contents: &str) -> Result<Value, DocumentError> {
    parse_as(Format::from_path(path), contents)
}

pub fn parse_as(format: Format, contents: &str) -> Result<Value, DocumentError> {
    match format {
        Format::Json => Ok(serde_json::from_str(contents)?),
        Format::Toml => {
            let table: toml::Table = toml::from_str(contents)?;
            Ok(toml_to_json(toml::Value::Table(table)))
        }
    }
}

/// Converts a TOML value into the JSON tree model.
///
/// Datetimes have no JSON counterpart and are kept as their string form.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
