//! Dotted-key lookup into an untyped resource tree.

use serde_json::Value;

/// Walks `segments` from `tree`, following object keys only.
///
/// Returns `None` as soon as a node is not an object or lacks the next key.
pub fn nested_object<'a, 'k>(
    tree: &'a Value,
    segments: impl IntoIterator<Item = &'k str>,
) -> Option<&'a Value> {
    segments
        .into_iter()
        .try_fold(tree, |current, segment| current.as_object()?.get(segment))
}

/// Resolves a dotted key such as `menu.file.open` against `tree`.
///
/// The last segment is looked up on whatever object the preceding segments
/// lead to. A missing or non-object intermediate node behaves like an empty
/// object, so the lookup yields `None` rather than failing.
pub fn resolve<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    let (parents, attr) = match key.rsplit_once('.') {
        Some((parents, attr)) => (Some(parents), attr),
        None => (None, key),
    };

    let parent = match parents {
        Some(parents) => nested_object(tree, parents.split('.'))?,
        None => tree,
    };

    parent.as_object()?.get(attr)
}
