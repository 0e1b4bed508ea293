//! pipedash-leaf-patch — the leaf-override patch store.
//!
//! A leaf-override map is a flat mapping from dotted-path keys
//! (`overrides.text.size`) to JSON values, layered on top of a computed
//! default by the thumbnail editor. This crate owns everything that touches
//! that map:
//!
//! - [`PatchOp`] — the `set`/`unset` operations the backend and the editor
//!   exchange, with their JSON codec.
//! - [`apply_ops`] — pure sequential application of an op batch.
//! - [`EditorStore`] — the undo/redo state machine driving the editor.
//! - [`diff`] — minimal op list between two snapshots ("save preset from
//!   current changes").
//! - [`to_nested`] — reshape a prefixed leaf map into the nested object the
//!   save endpoint expects.

pub mod apply;
pub mod cli;
pub mod diff;
pub mod export;
pub mod store;
pub mod types;

pub use apply::apply_ops;
pub use diff::diff;
pub use export::to_nested;
pub use store::{EditorAction, EditorStore, HISTORY_CAP};
pub use types::{ops_from_json, ops_to_json, LeafMap, OpsCodecError, PatchOp};
