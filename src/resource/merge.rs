//! Deep merge of resource trees.

use serde_json::{Map, Value};

/// Conflict policy applied when a bundle is merged into an existing tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Incoming values win on every conflicting leaf and on shape mismatches.
    #[default]
    Override,
    /// Existing values win; incoming values only fill paths that are absent.
    KeepExisting,
}

impl MergePolicy {
    fn overrides(self) -> bool {
        matches!(self, MergePolicy::Override)
    }
}

impl From<bool> for MergePolicy {
    fn from(override_existing: bool) -> Self {
        if override_existing {
            MergePolicy::Override
        } else {
            MergePolicy::KeepExisting
        }
    }
}

/// Deep-merges `source` into `target` and returns the merged tree.
///
/// At the top level `Value::Null` means "absent": merging a null source
/// returns `target`, merging into a null target returns `source`.
/// Arrays merge by index and objects by key; nested pairs are merged
/// recursively only when both sides are the same composite kind. Any other
/// conflict is settled by `policy`.
///
/// Both inputs are consumed; subtrees that are not merged are moved into the
/// result as-is.
pub fn merge(target: Value, source: Value, policy: MergePolicy) -> Value {
    match (target, source) {
        (target, Value::Null) => target,
        (Value::Null, source) => source,
        (Value::Array(target), Value::Array(source)) => {
            Value::Array(merge_arrays(target, source, policy))
        }
        (Value::Object(target), Value::Object(source)) => {
            Value::Object(merge_objects(target, source, policy))
        }
        (target, source) => {
            if policy.overrides() {
                source
            } else {
                target
            }
        }
    }
}

/// True when both values are arrays or both are objects.
pub fn same_shape(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_))
    )
}

fn merge_arrays(mut target: Vec<Value>, source: Vec<Value>, policy: MergePolicy) -> Vec<Value> {
    for (index, incoming) in source.into_iter().enumerate() {
        match target.get_mut(index) {
            Some(existing) => merge_slot(existing, incoming, policy),
            None => target.push(incoming),
        }
    }
    target
}

fn merge_objects(
    mut target: Map<String, Value>,
    source: Map<String, Value>,
    policy: MergePolicy,
) -> Map<String, Value> {
    for (key, incoming) in source {
        match target.get_mut(&key) {
            Some(existing) => merge_slot(existing, incoming, policy),
            None => {
                target.insert(key, incoming);
            }
        }
    }
    target
}

/// Merges `incoming` into a slot that already holds a value.
fn merge_slot(existing: &mut Value, incoming: Value, policy: MergePolicy) {
    if same_shape(existing, &incoming) {
        let current = std::mem::take(existing);
        *existing = merge(current, incoming, policy);
    } else if policy.overrides() {
        *existing = incoming;
    }
}
