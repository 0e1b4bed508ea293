//! Leaf-map diff: generate the minimal op list between two snapshots.

use std::collections::BTreeSet;

use pipedash_util::deep_equal;

use crate::types::{LeafMap, PatchOp};

/// Generate the minimal ordered op list that transforms `base` into
/// `current`.
///
/// Keys are visited in sorted order so the output is deterministic
/// regardless of map insertion order. Round-trip law:
/// `apply_ops(base, &diff(base, current))` is deep-equal to `current`.
pub fn diff(base: &LeafMap, current: &LeafMap) -> Vec<PatchOp> {
    let keys: BTreeSet<&str> = base
        .keys()
        .chain(current.keys())
        .map(|k| k.as_str())
        .collect();

    let mut ops = Vec::new();
    for key in keys {
        match (base.get(key), current.get(key)) {
            (Some(_), None) => ops.push(PatchOp::unset(key)),
            (None, Some(val)) => ops.push(PatchOp::set(key, val.clone())),
            (Some(old), Some(new)) => {
                if !deep_equal(old, new) {
                    ops.push(PatchOp::set(key, new.clone()));
                }
            }
            (None, None) => unreachable!("key came from one of the maps"),
        }
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::apply_ops;
    use pipedash_util::leaf_map_equal;
    use serde_json::json;

    fn leaf(entries: &[(&str, serde_json::Value)]) -> LeafMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn assert_roundtrip(base: &LeafMap, current: &LeafMap) {
        let ops = diff(base, current);
        let rebuilt = apply_ops(base, &ops);
        assert!(
            leaf_map_equal(&rebuilt, current),
            "replaying {ops:?} over {base:?} gave {rebuilt:?}, expected {current:?}"
        );
    }

    #[test]
    fn equal_maps_diff_to_nothing() {
        let a = leaf(&[("x", json!(1))]);
        let b = leaf(&[("x", json!(1))]);
        assert!(diff(&a, &b).is_empty());
    }

    #[test]
    fn numeric_equality_suppresses_op() {
        let a = leaf(&[("x", json!(1.0))]);
        let b = leaf(&[("x", json!(1))]);
        assert!(diff(&a, &b).is_empty());
    }

    #[test]
    fn only_in_base_emits_unset() {
        let a = leaf(&[("x", json!(1))]);
        let b = LeafMap::new();
        let ops = diff(&a, &b);
        assert_eq!(ops, vec![PatchOp::unset("x")]);
    }

    #[test]
    fn only_in_current_emits_set() {
        let a = LeafMap::new();
        let b = leaf(&[("x", json!(1))]);
        let ops = diff(&a, &b);
        assert_eq!(ops, vec![PatchOp::set("x", json!(1))]);
    }

    #[test]
    fn changed_value_emits_set() {
        let a = leaf(&[("x", json!(1))]);
        let b = leaf(&[("x", json!(2))]);
        let ops = diff(&a, &b);
        assert_eq!(ops, vec![PatchOp::set("x", json!(2))]);
    }

    #[test]
    fn output_is_sorted_by_key() {
        let a = leaf(&[("z", json!(1)), ("a", json!(1))]);
        let b = leaf(&[("m", json!(2))]);
        let ops = diff(&a, &b);
        let paths: Vec<&str> = ops.iter().map(|op| op.path()).collect();
        assert_eq!(paths, vec!["a", "m", "z"]);
    }

    #[test]
    fn roundtrip_empty_to_empty() {
        assert_roundtrip(&LeafMap::new(), &LeafMap::new());
    }

    #[test]
    fn roundtrip_additions_only() {
        assert_roundtrip(
            &LeafMap::new(),
            &leaf(&[("a.b", json!(1)), ("a.c", json!([1, 2]))]),
        );
    }

    #[test]
    fn roundtrip_removals_only() {
        assert_roundtrip(
            &leaf(&[("a.b", json!(1)), ("a.c", json!("x"))]),
            &LeafMap::new(),
        );
    }

    #[test]
    fn roundtrip_mixed_changes() {
        let base = leaf(&[
            ("overrides.text.size", json!(1.0)),
            ("overrides.text.color", json!("#fff")),
            ("overrides.bg.blur", json!(3)),
        ]);
        let current = leaf(&[
            ("overrides.text.size", json!(1.4)),
            ("overrides.bg.blur", json!(3)),
            ("overrides.badge.visible", json!(false)),
        ]);
        assert_roundtrip(&base, &current);
    }

    #[test]
    fn roundtrip_structured_values() {
        let base = leaf(&[("k", json!({"nested": [1, {"deep": true}]}))]);
        let current = leaf(&[("k", json!({"nested": [1, {"deep": false}]}))]);
        assert_roundtrip(&base, &current);
        assert_eq!(diff(&base, &current).len(), 1);
    }
}
