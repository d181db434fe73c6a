//! Lazily-resolving node views over a namespace of the resource store.
//!
//! A [`FacadeNode`] stands for a path inside a namespace. Reading a field
//! resolves `namespace.path.field` against the live store every time, so
//! bundles merged after the node was created are visible through it.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::template::stringify;
use super::SharedStore;

/// Result of reading a field through a [`FacadeNode`].
#[derive(Debug, Clone)]
pub enum FacadeValue {
    /// The field holds an object; navigate further through this node.
    Node(FacadeNode),
    /// The field holds a string, number, bool, null or array.
    Value(Value),
    /// Nothing is stored at the field. Holds `missing key: [{full_key}]`.
    Missing(String),
}

impl FacadeValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, FacadeValue::Missing(_))
    }

    pub fn as_node(&self) -> Option<&FacadeNode> {
        match self {
            FacadeValue::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FacadeValue::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The string leaf, if the field holds one.
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }
}

impl fmt::Display for FacadeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacadeValue::Node(node) => write!(f, "[{}]", node.full_key()),
            FacadeValue::Value(value) => f.write_str(&stringify(value)),
            FacadeValue::Missing(message) => f.write_str(message),
        }
    }
}

/// A virtual object rooted at a path inside one namespace of the store.
#[derive(Clone)]
pub struct FacadeNode {
    store: SharedStore,
    namespace: Arc<str>,
    path: Option<String>,
}

impl fmt::Debug for FacadeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacadeNode")
            .field("namespace", &self.namespace)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl FacadeNode {
    /// Creates a node over `namespace`, rooted at `base_path` when given.
    ///
    /// An empty `base_path` is the namespace root.
    pub(crate) fn new(store: SharedStore, namespace: &str, base_path: Option<&str>) -> Self {
        Self {
            store,
            namespace: Arc::from(namespace),
            path: base_path.filter(|p| !p.is_empty()).map(str::to_string),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Path of this node below the namespace, `None` at the root.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The dotted store key this node stands for.
    pub fn full_key(&self) -> String {
        match &self.path {
            Some(path) => format!("{}.{}", self.namespace, path),
            None => self.namespace.to_string(),
        }
    }

    /// Reads `field` from the live store.
    pub fn get(&self, field: &str) -> FacadeValue {
        let current_path = match &self.path {
            Some(path) => format!("{path}.{field}"),
            None => field.to_string(),
        };
        let full_key = format!("{}.{}", self.namespace, current_path);

        let store = self.store.read();
        match store.get(&full_key) {
            Some(Value::Object(_)) => FacadeValue::Node(FacadeNode {
                store: Arc::clone(&self.store),
                namespace: Arc::clone(&self.namespace),
                path: Some(current_path),
            }),
            Some(value) => FacadeValue::Value(value.clone()),
            None => FacadeValue::Missing(format!("missing key: [{full_key}]")),
        }
    }

    /// Follows a dotted chain of fields, one [`get`](Self::get) per segment.
    ///
    /// Reading past a leaf yields [`FacadeValue::Missing`] for the full
    /// dotted key; a missing segment yields the message for that segment.
    pub fn lookup(&self, dotted: &str) -> FacadeValue {
        let mut segments = dotted.split('.');
        let first = segments.next().unwrap_or_default();
        let mut current = self.get(first);
        for segment in segments {
            current = match current {
                FacadeValue::Node(node) => node.get(segment),
                FacadeValue::Value(_) => {
                    return FacadeValue::Missing(format!(
                        "missing key: [{}.{}]",
                        self.full_key(),
                        dotted
                    ));
                }
                missing @ FacadeValue::Missing(_) => return missing,
            };
        }
        current
    }

    /// Reads `field` and renders it for display.
    pub fn text(&self, field: &str) -> String {
        self.get(field).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{MergePolicy, ResourceStore};
    use parking_lot::RwLock;
    use serde_json::json;

    fn shared(bundle: Value) -> SharedStore {
        let mut store = ResourceStore::default();
        store.set_resource(bundle, MergePolicy::Override);
        Arc::new(RwLock::new(store))
    }

    #[test]
    fn test_nested_field_resolves_to_leaf() {
        let store = shared(json!({"app": {"greeting": {"hello": "Hi"}}}));
        let root = FacadeNode::new(store, "app", None);

        let greeting = root.get("greeting");
        let node = greeting.as_node().unwrap();

        assert_eq!(node.get("hello").as_str(), Some("Hi"));
        assert_eq!(node.full_key(), "app.greeting");
    }

    #[test]
    fn test_missing_field_message() {
        let store = shared(json!({"app": {"greeting": {"hello": "Hi"}}}));
        let root = FacadeNode::new(store, "app", None);

        let bye = root.lookup("greeting.bye");

        assert!(bye.is_missing());
        assert_eq!(bye.to_string(), "missing key: [app.greeting.bye]");
    }

    #[test]
    fn test_base_path() {
        let store = shared(json!({"app": {"menu": {"file": {"open": "Open"}}}}));
        let node = FacadeNode::new(store, "app", Some("menu.file"));

        assert_eq!(node.text("open"), "Open");
        assert_eq!(node.text("close"), "missing key: [app.menu.file.close]");
    }

    #[test]
    fn test_empty_base_path_is_root() {
        let store = shared(json!({"app": {"title": "T"}}));
        let node = FacadeNode::new(store, "app", Some(""));
        assert_eq!(node.path(), None);
        assert_eq!(node.text("title"), "T");
    }

    #[test]
    fn test_non_object_values_returned_verbatim() {
        let store = shared(json!({"app": {"n": 3, "on": true, "list": [{"a": 1}], "none": null}}));
        let root = FacadeNode::new(store, "app", None);

        assert_eq!(root.get("n").as_value(), Some(&json!(3)));
        assert_eq!(root.get("on").as_value(), Some(&json!(true)));
        assert_eq!(root.get("list").as_value(), Some(&json!([{"a": 1}])));
        assert_eq!(root.get("none").as_value(), Some(&Value::Null));
    }

    #[test]
    fn test_reads_live_store() {
        let store = shared(json!({"app": {"title": "Old"}}));
        let root = FacadeNode::new(Arc::clone(&store), "app", None);
        assert_eq!(root.text("title"), "Old");

        store
            .write()
            .set_resource(json!({"app": {"title": "New", "extra": {"x": "y"}}}), MergePolicy::Override);

        assert_eq!(root.text("title"), "New");
        assert_eq!(root.lookup("extra.x").as_str(), Some("y"));
    }

    #[test]
    fn test_lookup_past_leaf_is_missing() {
        let store = shared(json!({"app": {"title": "T", "menu": {"n": 3}}}));
        let root = FacadeNode::new(store, "app", None);

        let past_title = root.lookup("title.more");
        assert!(past_title.is_missing());
        assert_eq!(past_title.to_string(), "missing key: [app.title.more]");
        assert_eq!(root.lookup("menu.n.x.y").to_string(), "missing key: [app.menu.n.x.y]");
    }

    #[test]
    fn test_lookup_past_missing_reports_first_gap() {
        let store = shared(json!({"app": {}}));
        let root = FacadeNode::new(store, "app", None);
        assert_eq!(root.lookup("a.b.c").to_string(), "missing key: [app.a]");
    }

    #[test]
    fn test_node_display_shows_key() {
        let store = shared(json!({"app": {"menu": {"a": "b"}}}));
        let root = FacadeNode::new(store, "app", None);
        assert_eq!(root.text("menu"), "[app.menu]");
    }
}
