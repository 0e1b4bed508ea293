//! The editor's undo/redo state machine.
//!
//! One store per edit target (channel + video + variant). Selecting a new
//! target dispatches [`EditorAction::ResetBase`], which replaces the whole
//! state; history never leaks across targets. All transitions are
//! synchronous and single-threaded; persistence is the caller's job.

use pipedash_util::leaf_map_equal;

use crate::apply::apply_ops;
use crate::types::{LeafMap, PatchOp};

/// Maximum number of snapshots retained on each history stack. Oldest
/// entries are evicted first.
pub const HISTORY_CAP: usize = 60;

/// Actions accepted by [`EditorStore::dispatch`].
#[derive(Debug, Clone)]
pub enum EditorAction {
    ResetBase(LeafMap),
    ApplyOps(Vec<PatchOp>),
    Undo,
    Redo,
    ResetToBase,
}

/// Reducer-style override editor state.
///
/// Invariant: `current` is always reconstructible by replaying some
/// subsequence of applied ops against `base`. An applied change is only
/// ever dropped through an explicit `Undo` or `ResetToBase`.
#[derive(Debug, Clone, Default)]
pub struct EditorStore {
    base: LeafMap,
    current: LeafMap,
    undo_stack: Vec<LeafMap>,
    redo_stack: Vec<LeafMap>,
}

impl EditorStore {
    pub fn new(base: LeafMap) -> Self {
        Self {
            current: base.clone(),
            base,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, action: EditorAction) {
        match action {
            EditorAction::ResetBase(base) => self.reset_base(base),
            EditorAction::ApplyOps(ops) => self.apply_ops(&ops),
            EditorAction::Undo => {
                self.undo();
            }
            EditorAction::Redo => {
                self.redo();
            }
            EditorAction::ResetToBase => self.reset_to_base(),
        }
    }

    /// Replace the base snapshot and wipe all history. Used whenever the
    /// selected edit target changes.
    pub fn reset_base(&mut self, base: LeafMap) {
        self.current = base.clone();
        self.base = base;
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Apply a batch of ops to `current`.
    ///
    /// A batch whose net effect leaves `current` deep-equal is a no-op:
    /// neither stack moves, so repeated identical edits never pollute
    /// history. Otherwise the previous `current` is pushed onto the undo
    /// stack (capped) and the redo stack is cleared.
    pub fn apply_ops(&mut self, ops: &[PatchOp]) {
        let next = apply_ops(&self.current, ops);
        if leaf_map_equal(&next, &self.current) {
            return;
        }
        let prev = std::mem::replace(&mut self.current, next);
        push_capped(&mut self.undo_stack, prev);
        self.redo_stack.clear();
    }

    /// Step back one snapshot. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.undo_stack.pop() else {
            return false;
        };
        let redone = std::mem::replace(&mut self.current, prev);
        push_capped(&mut self.redo_stack, redone);
        true
    }

    /// Step forward one snapshot. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, next);
        push_capped(&mut self.undo_stack, undone);
        true
    }

    /// Discard all pending changes, keeping the jump itself undoable.
    pub fn reset_to_base(&mut self) {
        if leaf_map_equal(&self.current, &self.base) {
            return;
        }
        let prev = std::mem::replace(&mut self.current, self.base.clone());
        push_capped(&mut self.undo_stack, prev);
        self.redo_stack.clear();
    }

    pub fn base(&self) -> &LeafMap {
        &self.base
    }

    pub fn current(&self) -> &LeafMap {
        &self.current
    }

    /// True when `current` differs from `base` (unsaved changes).
    pub fn is_dirty(&self) -> bool {
        !leaf_map_equal(&self.current, &self.base)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

fn push_capped(stack: &mut Vec<LeafMap>, snapshot: LeafMap) {
    if stack.len() == HISTORY_CAP {
        stack.remove(0);
    }
    stack.push(snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf(entries: &[(&str, serde_json::Value)]) -> LeafMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn new_store_starts_clean() {
        let store = EditorStore::new(leaf(&[("a", json!(1))]));
        assert!(!store.is_dirty());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn apply_ops_pushes_undo_frame() {
        let mut store = EditorStore::new(LeafMap::new());
        store.apply_ops(&[PatchOp::set("a", json!(1))]);
        assert!(store.is_dirty());
        assert_eq!(store.undo_depth(), 1);
        assert_eq!(store.current().get("a"), Some(&json!(1)));
    }

    #[test]
    fn noop_batch_leaves_stacks_untouched() {
        let mut store = EditorStore::new(leaf(&[("a", json!(1))]));
        store.apply_ops(&[PatchOp::set("b", json!(2))]);
        let undo_before = store.undo_depth();
        let redo_before = store.redo_depth();

        // set to the same value, and set+unset of a fresh key
        store.apply_ops(&[PatchOp::set("a", json!(1))]);
        store.apply_ops(&[PatchOp::set("tmp", json!(9)), PatchOp::unset("tmp")]);

        assert_eq!(store.undo_depth(), undo_before);
        assert_eq!(store.redo_depth(), redo_before);
    }

    #[test]
    fn noop_batch_recognizes_numeric_equality() {
        let mut store = EditorStore::new(leaf(&[("size", json!(1.0))]));
        store.apply_ops(&[PatchOp::set("size", json!(1))]);
        assert_eq!(store.undo_depth(), 0);
    }

    #[test]
    fn undo_returns_to_previous_snapshot() {
        let mut store = EditorStore::new(LeafMap::new());
        store.apply_ops(&[PatchOp::set("a", json!(1))]);
        store.apply_ops(&[PatchOp::set("a", json!(2))]);
        assert!(store.undo());
        assert_eq!(store.current().get("a"), Some(&json!(1)));
        assert!(store.can_redo());
    }

    #[test]
    fn undo_on_empty_stack_is_noop() {
        let mut store = EditorStore::new(leaf(&[("a", json!(1))]));
        assert!(!store.undo());
        assert_eq!(store.current(), store.base());
    }

    #[test]
    fn undo_then_redo_restores() {
        let mut store = EditorStore::new(LeafMap::new());
        store.apply_ops(&[PatchOp::set("a", json!(1))]);
        let before = store.current().clone();
        store.undo();
        store.redo();
        assert_eq!(store.current(), &before);
    }

    #[test]
    fn apply_after_undo_clears_redo() {
        let mut store = EditorStore::new(LeafMap::new());
        store.apply_ops(&[PatchOp::set("a", json!(1))]);
        store.undo();
        assert!(store.can_redo());
        store.apply_ops(&[PatchOp::set("b", json!(2))]);
        assert!(!store.can_redo());
    }

    #[test]
    fn undo_once_per_batch_returns_to_base() {
        let base = leaf(&[("keep", json!("x"))]);
        let mut store = EditorStore::new(base.clone());
        store.apply_ops(&[PatchOp::set("a", json!(1))]);
        store.apply_ops(&[PatchOp::set("b", json!(2)), PatchOp::unset("keep")]);
        store.apply_ops(&[PatchOp::set("a", json!(3))]);
        store.undo();
        store.undo();
        store.undo();
        assert_eq!(store.current(), &base);
        assert!(!store.is_dirty());
    }

    #[test]
    fn reset_to_base_is_undoable() {
        let mut store = EditorStore::new(LeafMap::new());
        store.apply_ops(&[PatchOp::set("a", json!(1))]);
        store.reset_to_base();
        assert!(!store.is_dirty());
        store.undo();
        assert_eq!(store.current().get("a"), Some(&json!(1)));
    }

    #[test]
    fn reset_to_base_when_clean_is_noop() {
        let mut store = EditorStore::new(leaf(&[("a", json!(1))]));
        store.reset_to_base();
        assert_eq!(store.undo_depth(), 0);
    }

    #[test]
    fn reset_base_wipes_history() {
        let mut store = EditorStore::new(LeafMap::new());
        store.apply_ops(&[PatchOp::set("a", json!(1))]);
        store.undo();
        store.reset_base(leaf(&[("fresh", json!(true))]));
        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert_eq!(store.current(), store.base());
    }

    #[test]
    fn undo_stack_caps_and_evicts_oldest() {
        let mut store = EditorStore::new(LeafMap::new());
        for i in 0..(HISTORY_CAP + 10) {
            store.apply_ops(&[PatchOp::set("n", json!(i))]);
        }
        assert_eq!(store.undo_depth(), HISTORY_CAP);

        // Unwind the whole stack; the earliest reachable snapshot is the
        // one from before the last HISTORY_CAP edits, not the base.
        while store.undo() {}
        assert_eq!(store.current().get("n"), Some(&json!(9)));
    }

    #[test]
    fn dispatch_covers_all_actions() {
        let mut store = EditorStore::new(LeafMap::new());
        store.dispatch(EditorAction::ApplyOps(vec![PatchOp::set("a", json!(1))]));
        store.dispatch(EditorAction::Undo);
        store.dispatch(EditorAction::Redo);
        assert_eq!(store.current().get("a"), Some(&json!(1)));
        store.dispatch(EditorAction::ResetToBase);
        assert!(!store.is_dirty());
        store.dispatch(EditorAction::ResetBase(leaf(&[("z", json!(0))])));
        assert_eq!(store.base().get("z"), Some(&json!(0)));
    }
}
