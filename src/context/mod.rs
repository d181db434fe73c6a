//! The application-wide i18n context.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Settings;
use crate::preference::PreferenceStore;
use crate::resource::{
    append_suffix, format_text, FacadeNode, FileLoader, LanguagePolicy, MergePolicy,
    ResourceLoader, ResourceStore, SharedStore,
};
use crate::Error;

/// A key paired with the text to show when the key is not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextToken {
    pub key: String,
    pub text: String,
}

impl TextToken {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// Central i18n context holding the merged resources and the active language.
///
/// Create one at application start and hand out clones; every clone, and
/// every [`FacadeNode`] built from it, shares the same store.
///
/// ## Example
///
/// ```
/// use i18n_resources::{json, I18n, MergePolicy};
///
/// let i18n = I18n::builder().build()?;
/// i18n.set_resource(json!({"app": {"hello": "Hello {{name}}"}}), MergePolicy::Override);
///
/// assert_eq!(i18n.text_with("app.hello", &json!({"name": "Ada"})), "Hello Ada");
/// assert_eq!(i18n.text("app.bye"), "Invalid key: app.bye");
/// # Ok::<(), i18n_resources::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct I18n {
    store: SharedStore,
    loader: Arc<dyn ResourceLoader>,
    preferences: Option<Arc<dyn PreferenceStore>>,
    settings: Arc<Settings>,
}

impl I18n {
    /// Creates a new builder for constructing an `I18n` context.
    pub fn builder() -> I18nBuilder {
        I18nBuilder::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn language(&self) -> String {
        self.store.read().language().to_string()
    }

    /// Changes the active language used by later [`load_resources`](Self::load_resources) calls.
    ///
    /// Bundles already merged stay in place; nothing is reloaded.
    pub fn set_language(&self, language: impl Into<String>) -> Result<(), Error> {
        let language = language.into();
        self.store.write().set_language(language.as_str())?;
        tracing::info!(language = %language, "language changed");
        Ok(())
    }

    /// Applies the language stored in the preference store, if any.
    ///
    /// A stored language rejected by the language policy is logged and
    /// ignored.
    pub fn initialize(&self) {
        let Some(preferences) = &self.preferences else {
            return;
        };
        let Some(language) = preferences.get(&self.settings.preference_key) else {
            tracing::debug!(key = %self.settings.preference_key, "no stored language preference");
            return;
        };
        if let Err(e) = self.set_language(language) {
            tracing::warn!("ignoring stored language preference: {}", e);
        }
    }

    /// Writes the active language to the preference store.
    ///
    /// Does nothing when no preference store is configured.
    pub fn save_language(&self) -> Result<(), Error> {
        if let Some(preferences) = &self.preferences {
            preferences.set(&self.settings.preference_key, &self.language())?;
        }
        Ok(())
    }

    /// Merges `bundle` into the resource tree.
    pub fn set_resource(&self, bundle: Value, policy: MergePolicy) {
        tracing::debug!(?policy, "merging resource bundle");
        self.store.write().set_resource(bundle, policy);
    }

    /// A copy of the value stored at `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.store.read().get(key).cloned()
    }

    /// A copy of the whole merged resource tree.
    pub fn resources(&self) -> Value {
        self.store.read().resources().clone()
    }

    /// See [`ResourceStore::get_text`].
    pub fn get_text(&self, key: &str, params: Option<&Value>, default: Option<&str>) -> String {
        self.store.read().get_text(key, params, default)
    }

    pub fn text(&self, key: &str) -> String {
        self.store.read().text(key)
    }

    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.store.read().text_or(key, default)
    }

    pub fn text_with(&self, key: &str, params: &Value) -> String {
        self.store.read().text_with(key, params)
    }

    /// Resolves `token.key` with `token.text` as the fallback and always
    /// interpolates the result; absent params leave every placeholder
    /// `Missing`.
    pub fn get_i18n_text(&self, token: &TextToken, params: Option<&Value>) -> String {
        let text = self.get_text(&token.key, None, Some(&token.text));
        format_text(&text, params)
    }

    /// Expands `{{path}}` placeholders in `template`.
    pub fn format_text(&self, template: &str, params: Option<&Value>) -> String {
        format_text(template, params)
    }

    /// Loads the language-specific variant of each named file, in order.
    ///
    /// `strings.json` is requested as `strings_{language}.json`. A file that
    /// fails to load is logged and skipped; the others are still merged.
    pub fn load_resources<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let language = self.language();
        for name in names {
            let name = name.as_ref();
            let file = append_suffix(name, &language);
            match self.loader.load(&file) {
                Ok(Some(bundle)) => self.set_resource(bundle, MergePolicy::Override),
                Ok(None) => {
                    tracing::debug!(resource = %name, file = %file, "no data for resource");
                }
                Err(e) => {
                    tracing::error!(resource = %name, file = %file, "cannot load resource: {}", e);
                }
            }
        }
    }

    pub fn load_resource(&self, name: &str) {
        self.load_resources([name]);
    }

    /// Registers `default_bundle` under `namespace` and returns a node view over it.
    ///
    /// The defaults are merged with [`MergePolicy::KeepExisting`], so values
    /// already loaded for the namespace take precedence. The node is rooted
    /// at `base_path` when given.
    pub fn create_resource_proxy(
        &self,
        default_bundle: Value,
        namespace: &str,
        base_path: Option<&str>,
    ) -> FacadeNode {
        self.set_resource(json!({ namespace: default_bundle }), MergePolicy::KeepExisting);
        FacadeNode::new(Arc::clone(&self.store), namespace, base_path)
    }
}

/// Builder for constructing an [`I18n`] context.
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct I18nBuilder {
    settings: Option<Settings>,
    loader: Option<Arc<dyn ResourceLoader>>,
    preferences: Option<Arc<dyn PreferenceStore>>,
}

impl I18nBuilder {
    /// Uses the given settings instead of [`Settings::default`].
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Replaces the default [`FileLoader`] rooted at `settings.resource_dir`.
    pub fn with_loader(mut self, loader: impl ResourceLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    pub fn with_preferences(mut self, preferences: impl PreferenceStore + 'static) -> Self {
        self.preferences = Some(Arc::new(preferences));
        self
    }

    /// Builds the context.
    ///
    /// Returns an error if `default_language` is not an allowed language.
    pub fn build(self) -> Result<I18n, Error> {
        let settings = self.settings.unwrap_or_default();
        let mut store = ResourceStore::new(LanguagePolicy::from_allowed(
            settings.allowed_languages.clone(),
        ));
        if !settings.default_language.is_empty() {
            store.set_language(settings.default_language.as_str())?;
        }

        let loader: Arc<dyn ResourceLoader> = match self.loader {
            Some(loader) => loader,
            None => Arc::new(FileLoader::new(&settings.resource_dir)),
        };

        Ok(I18n {
            store: Arc::new(RwLock::new(store)),
            loader,
            preferences: self.preferences,
            settings: Arc::new(settings),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::MemoryLoader;
    use crate::MemoryPreferences;
    use tempfile::TempDir;

    fn settings(default: &str, allowed: &[&str]) -> Settings {
        Settings {
            default_language: default.to_string(),
            allowed_languages: allowed.iter().map(|s| s.to_string()).collect(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_build_with_defaults() {
        let i18n = I18n::builder().build().unwrap();
        assert_eq!(i18n.language(), "");
        assert_eq!(i18n.resources(), json!({}));
    }

    #[test]
    fn test_build_rejects_disallowed_default() {
        let result = I18n::builder().with_settings(settings("de", &["en", "fr"])).build();
        assert!(matches!(result, Err(Error::InvalidLanguage { .. })));
    }

    #[test]
    fn test_set_language_validation() {
        let i18n = I18n::builder()
            .with_settings(settings("en", &["en", "fr"]))
            .build()
            .unwrap();

        i18n.set_language("fr").unwrap();
        assert!(i18n.set_language("xx").is_err());
        assert_eq!(i18n.language(), "fr");
    }

    #[test]
    fn test_load_resources_uses_language_suffix() {
        let loader = MemoryLoader::new()
            .with_bundle("app_en.json", json!({"app": {"title": "Viewer"}}))
            .with_bundle("app_fr.json", json!({"app": {"title": "Visionneuse"}}));
        let i18n = I18n::builder()
            .with_settings(settings("fr", &[]))
            .with_loader(loader)
            .build()
            .unwrap();

        i18n.load_resource("app.json");

        assert_eq!(i18n.text("app.title"), "Visionneuse");
    }

    #[test]
    fn test_load_resources_is_best_effort() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a_en.json"), r#"{"a": {"x": "1", "y": "first"}}"#).unwrap();
        std::fs::write(dir.path().join("b_en.json"), "{ broken").unwrap();
        std::fs::write(dir.path().join("c_en.toml"), "[a]\ny = \"last\"\n").unwrap();
        let i18n = I18n::builder()
            .with_settings(Settings {
                default_language: "en".to_string(),
                resource_dir: dir.path().to_path_buf(),
                ..Settings::default()
            })
            .build()
            .unwrap();

        i18n.load_resources(["a.json", "b.json", "missing.json", "c.toml"]);

        assert_eq!(i18n.text("a.x"), "1");
        assert_eq!(i18n.text("a.y"), "last");
    }

    #[test]
    fn test_language_switch_keeps_loaded_strings() {
        let loader = MemoryLoader::new()
            .with_bundle("app_en.json", json!({"app": {"title": "Viewer", "help": "Help"}}))
            .with_bundle("app_fr.json", json!({"app": {"title": "Visionneuse"}}));
        let i18n = I18n::builder()
            .with_settings(settings("en", &[]))
            .with_loader(loader)
            .build()
            .unwrap();

        i18n.load_resource("app.json");
        i18n.set_language("fr").unwrap();
        assert_eq!(i18n.text("app.title"), "Viewer");

        i18n.load_resource("app.json");
        assert_eq!(i18n.text("app.title"), "Visionneuse");
        assert_eq!(i18n.text("app.help"), "Help");
    }

    #[test]
    fn test_resource_proxy_defaults_do_not_override_loaded() {
        let i18n = I18n::builder().build().unwrap();
        i18n.set_resource(json!({"app": {"greeting": {"hello": "Salut"}}}), MergePolicy::Override);

        let app = i18n.create_resource_proxy(
            json!({"greeting": {"hello": "Hi", "bye": "Bye"}}),
            "app",
            None,
        );

        assert_eq!(app.lookup("greeting.hello").as_str(), Some("Salut"));
        assert_eq!(app.lookup("greeting.bye").as_str(), Some("Bye"));
    }

    #[test]
    fn test_resource_proxy_scenario() {
        let i18n = I18n::builder().build().unwrap();
        let app = i18n.create_resource_proxy(json!({"greeting": {"hello": "Hi"}}), "app", None);

        assert_eq!(app.lookup("greeting.hello").to_string(), "Hi");
        assert_eq!(
            app.lookup("greeting.bye").to_string(),
            "missing key: [app.greeting.bye]"
        );
    }

    #[test]
    fn test_resource_proxy_sees_later_loads() {
        let loader = MemoryLoader::new()
            .with_bundle("menu_de.json", json!({"menu": {"file": {"open": "Öffnen"}}}));
        let i18n = I18n::builder()
            .with_settings(settings("de", &[]))
            .with_loader(loader)
            .build()
            .unwrap();
        let file = i18n.create_resource_proxy(
            json!({"file": {"open": "Open"}}),
            "menu",
            Some("file"),
        );
        assert_eq!(file.text("open"), "Open");

        i18n.load_resource("menu.json");

        assert_eq!(file.text("open"), "Öffnen");
    }

    #[test]
    fn test_get_i18n_text() {
        let i18n = I18n::builder().build().unwrap();
        i18n.set_resource(json!({"files": {"count": "{{n}} files"}}), MergePolicy::Override);

        let loaded = TextToken::new("files.count", "Some files");
        let fallback = TextToken::new("files.size", "{{size}} bytes");

        assert_eq!(i18n.get_i18n_text(&loaded, Some(&json!({"n": 4}))), "4 files");
        assert_eq!(i18n.get_i18n_text(&fallback, Some(&json!({"size": 12}))), "12 bytes");
        assert_eq!(i18n.get_i18n_text(&fallback, None), "Missing bytes");
    }

    #[test]
    fn test_initialize_reads_preference() {
        let i18n = I18n::builder()
            .with_settings(settings("en", &["en", "fr"]))
            .with_preferences(MemoryPreferences::new().with("language", "fr"))
            .build()
            .unwrap();

        i18n.initialize();

        assert_eq!(i18n.language(), "fr");
    }

    #[test]
    fn test_initialize_ignores_disallowed_preference() {
        let i18n = I18n::builder()
            .with_settings(settings("en", &["en", "fr"]))
            .with_preferences(MemoryPreferences::new().with("language", "xx"))
            .build()
            .unwrap();

        i18n.initialize();

        assert_eq!(i18n.language(), "en");
    }

    #[test]
    fn test_save_language_uses_preference_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.toml");
        let i18n = I18n::builder()
            .with_settings(Settings {
                preference_key: "ui_language".to_string(),
                ..Settings::default()
            })
            .with_preferences(crate::FilePreferences::new(&path))
            .build()
            .unwrap();

        i18n.set_language("ja").unwrap();
        i18n.save_language().unwrap();

        let reloaded = I18n::builder()
            .with_settings(Settings {
                preference_key: "ui_language".to_string(),
                ..Settings::default()
            })
            .with_preferences(crate::FilePreferences::new(&path))
            .build()
            .unwrap();
        reloaded.initialize();
        assert_eq!(reloaded.language(), "ja");
    }

    #[test]
    fn test_clones_share_store() {
        let i18n = I18n::builder().build().unwrap();
        let other = i18n.clone();
        other.set_resource(json!({"k": "v"}), MergePolicy::Override);
        assert_eq!(i18n.get("k"), Some(json!("v")));
    }
}
