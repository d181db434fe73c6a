//! The merged resource tree and the active language.

use serde_json::{Map, Value};

use super::merge::{merge, MergePolicy};
use super::path::resolve;
use super::template::format_text;
use crate::Error;

/// Which language identifiers [`ResourceStore::set_language`] accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LanguagePolicy {
    /// Every identifier is accepted.
    #[default]
    Any,
    /// Only the listed identifiers are accepted.
    AllowList(Vec<String>),
}

impl LanguagePolicy {
    /// Builds a policy from a configured list; an empty list accepts anything.
    pub fn from_allowed(allowed: Vec<String>) -> Self {
        if allowed.is_empty() {
            LanguagePolicy::Any
        } else {
            LanguagePolicy::AllowList(allowed)
        }
    }

    pub fn permits(&self, language: &str) -> bool {
        match self {
            LanguagePolicy::Any => true,
            LanguagePolicy::AllowList(allowed) => allowed.iter().any(|l| l == language),
        }
    }

    fn check(&self, language: &str) -> Result<(), Error> {
        match self {
            LanguagePolicy::AllowList(allowed) if !self.permits(language) => {
                Err(Error::InvalidLanguage {
                    language: language.to_string(),
                    allowed: allowed.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Holds one merged resource tree for the whole process.
///
/// Every bundle passed to [`set_resource`](Self::set_resource) is folded into
/// the same tree in submission order. The active language only matters to
/// loaders choosing which files to read; it does not select a tree.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    resources: Value,
    language: String,
    policy: LanguagePolicy,
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new(LanguagePolicy::Any)
    }
}

impl ResourceStore {
    pub fn new(policy: LanguagePolicy) -> Self {
        Self {
            resources: Value::Object(Map::new()),
            language: String::new(),
            policy,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Changes the active language.
    ///
    /// Fails with [`Error::InvalidLanguage`] when the policy rejects the
    /// value; the previous language is kept in that case.
    pub fn set_language(&mut self, language: impl Into<String>) -> Result<(), Error> {
        let language = language.into();
        self.policy.check(&language)?;
        self.language = language;
        Ok(())
    }

    pub fn policy(&self) -> &LanguagePolicy {
        &self.policy
    }

    /// Merges `bundle` into the held tree.
    pub fn set_resource(&mut self, bundle: Value, policy: MergePolicy) {
        let current = std::mem::take(&mut self.resources);
        self.resources = merge(current, bundle, policy);
    }

    /// The whole merged tree.
    pub fn resources(&self) -> &Value {
        &self.resources
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        resolve(&self.resources, key)
    }

    /// Resolves `key` to display text.
    ///
    /// Falls back to `default` (when non-empty) or to `Invalid key: {key}`
    /// if the key is missing or does not hold a string. A string passed as
    /// `params` stands in for `default` when no default is given. Only object
    /// params are interpolated; any other params leave the text untouched.
    pub fn get_text(&self, key: &str, params: Option<&Value>, default: Option<&str>) -> String {
        let default = match (params, default) {
            (Some(Value::String(text)), None) => Some(text.as_str()),
            (_, default) => default,
        };
        let params = params.filter(|params| params.is_object());

        let text = match self.get(key) {
            Some(Value::String(text)) => text.clone(),
            _ => match default {
                Some(default) if !default.is_empty() => default.to_string(),
                _ => format!("Invalid key: {key}"),
            },
        };

        match params {
            Some(params) => format_text(&text, Some(params)),
            None => text,
        }
    }

    pub fn text(&self, key: &str) -> String {
        self.get_text(key, None, None)
    }

    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.get_text(key, None, Some(default))
    }

    pub fn text_with(&self, key: &str, params: &Value) -> String {
        self.get_text(key, Some(params), None)
    }
}
