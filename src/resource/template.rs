//! `{{path}}` placeholder expansion.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use super::path::nested_object;

/// Rendered in place of a placeholder whose path cannot be resolved.
pub const MISSING_PARAM: &str = "Missing";

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^}]+?)\s*\}\}").unwrap());

/// Expands every `{{ a.b.c }}` placeholder in `template` against `params`.
///
/// Each path is walked one object key at a time; the first segment that
/// cannot be found renders as [`MISSING_PARAM`]. Arrays are not indexed, so
/// `{{items.0}}` is missing. Absent params behave like an empty object.
pub fn format_text(template: &str, params: Option<&Value>) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| {
            let path = &caps[1];
            match params.and_then(|params| nested_object(params, path.split('.'))) {
                Some(value) => stringify(value),
                None => MISSING_PARAM.to_string(),
            }
        })
        .into_owned()
}

/// Converts a parameter value to the text inserted into a template.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                if f == 0.0 {
                    "0".to_string()
                } else {
                    format!("{f:.0}")
                }
            }
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
