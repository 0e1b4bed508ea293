//! Reshape a flat leaf map into the nested object the save endpoint takes.

use serde_json::{Map, Value};

use pipedash_util::is_blank_value;

use crate::types::LeafMap;

/// Build the nested save payload from a prefixed leaf map.
///
/// Each key must start with `prefix` followed by a dot; everything else is
/// skipped. The prefix segment is dropped and the remaining segments become
/// nested containers, the final one holding the value. A scalar sitting
/// where a deeper path needs a container is overwritten by an object.
///
/// Two classes of entries never reach the output:
/// - keys with fewer than two segments (a bare `overrides` key has no slot
///   in the nested shape; the `overrides.*` contract assumes at least one
///   segment past the prefix),
/// - null and empty-string values ("unset" is the way to remove a value,
///   not an empty `set`).
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use pipedash_leaf_patch::{to_nested, LeafMap};
///
/// let mut leaf = LeafMap::new();
/// leaf.insert("overrides.text.size".into(), json!(1.2));
/// leaf.insert("overrides.text.color".into(), json!(""));
///
/// let nested = to_nested(&leaf, "overrides");
/// assert_eq!(serde_json::Value::Object(nested), json!({"text": {"size": 1.2}}));
/// ```
pub fn to_nested(leaf: &LeafMap, prefix: &str) -> Map<String, Value> {
    let mut root = Map::new();
    for (key, value) in leaf {
        if is_blank_value(value) {
            continue;
        }
        let Some(rest) = key.strip_prefix(prefix) else {
            continue;
        };
        let Some(rest) = rest.strip_prefix('.') else {
            continue;
        };
        let segments: Vec<&str> = rest.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            continue;
        }
        insert_nested(&mut root, &segments, value.clone());
    }
    root
}

fn insert_nested(root: &mut Map<String, Value>, segments: &[&str], value: Value) {
    let (last, parents) = segments.split_last().expect("segments are non-empty");
    let mut node = root;
    for segment in parents {
        let slot = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        node = slot.as_object_mut().expect("slot was just made an object");
    }
    node.insert(last.to_string(), value);
}
