//! Sequential application of patch op batches.

use crate::types::{LeafMap, PatchOp};

/// Apply a batch of ops to a snapshot, returning the resulting snapshot.
///
/// Pure: the input map is never mutated. Ops apply in array order, so later
/// ops to the same path win within a batch. `unset` of a missing path is a
/// no-op. Paths and values are not validated here; the map accepts any
/// string key (the `overrides.*` contract is enforced only at export time).
pub fn apply_ops(base: &LeafMap, ops: &[PatchOp]) -> LeafMap {
    let mut next = base.clone();
    for op in ops {
        match op {
            PatchOp::Set { path, value } => {
                next.insert(path.clone(), value.clone());
            }
            PatchOp::Unset { path } => {
                next.shift_remove(path);
            }
        }
    }
    next
}
