use indexmap::IndexMap;
use serde_json::Value;

/// Performs a deep equality check between two JSON values.
///
/// Values are compared recursively:
/// - Primitives (null, bool, string) compare directly.
/// - Numbers compare by numeric value, so `1` equals `1.0`. Override
///   payloads cross a JavaScript boundary where the two are the same
///   number; strict `serde_json::Number` equality would report a phantom
///   edit every time a float round-trips as an integer.
/// - Arrays compare element-by-element.
/// - Objects compare key-by-key, insertion order ignored.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use pipedash_util::deep_equal;
///
/// assert!(deep_equal(&json!({"size": 1.0}), &json!({"size": 1})));
/// assert!(!deep_equal(&json!({"size": 1.0}), &json!({"size": 2})));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Array(arr_a), Value::Array(arr_b)) => {
            if arr_a.len() != arr_b.len() {
                return false;
            }
            arr_a
                .iter()
                .zip(arr_b.iter())
                .all(|(va, vb)| deep_equal(va, vb))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            obj_a.iter().all(|(key, val_a)| match obj_b.get(key) {
                Some(val_b) => deep_equal(val_a, val_b),
                None => false,
            })
        }

        // Different types are never equal
        _ => false,
    }
}

/// Deep equality over flat string-keyed maps (leaf-override snapshots).
///
/// Key order is irrelevant; values are compared with [`deep_equal`].
pub fn leaf_map_equal(a: &IndexMap<String, Value>, b: &IndexMap<String, Value>) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(key, val_a)| match b.get(key) {
        Some(val_b) => deep_equal(val_a, val_b),
        None => false,
    })
}
