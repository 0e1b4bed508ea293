//! Core types for the leaf-override patch module.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A flat leaf-override snapshot: dotted-path key → value.
///
/// Keys are flat by contract; nesting lives in the path string itself and is
/// only reconstructed by [`crate::export::to_nested`] when talking to the
/// save endpoint. `IndexMap` keeps insertion order stable so snapshots
/// serialize deterministically.
pub type LeafMap = IndexMap<String, Value>;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum OpsCodecError {
    /// The ops payload was not valid JSON, or an op carried an unknown tag
    /// or a missing field. Strict on purpose: silently dropping an op the
    /// store does not understand would desynchronize the editor from what
    /// the user approved.
    #[error("invalid ops payload: {0}")]
    Invalid(#[from] serde_json::Error),
}

// ── Patch operations ──────────────────────────────────────────────────────

/// A single patch operation against a [`LeafMap`].
///
/// Wire shape matches the backend ops array:
/// `{"op": "set", "path": "overrides.text.size", "value": 1.2}` and
/// `{"op": "unset", "path": "overrides.text.color"}`. Ops from the
/// comment-to-patch endpoint, from presets, and from the editor UI are all
/// identical at this level; provenance is not modeled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    Set { path: String, value: Value },
    Unset { path: String },
}

impl PatchOp {
    pub fn set(path: impl Into<String>, value: Value) -> Self {
        PatchOp::Set {
            path: path.into(),
            value,
        }
    }

    pub fn unset(path: impl Into<String>) -> Self {
        PatchOp::Unset { path: path.into() }
    }

    /// Returns the operation name string.
    pub fn op_name(&self) -> &'static str {
        match self {
            PatchOp::Set { .. } => "set",
            PatchOp::Unset { .. } => "unset",
        }
    }

    /// Returns the dotted path the operation targets.
    pub fn path(&self) -> &str {
        match self {
            PatchOp::Set { path, .. } => path,
            PatchOp::Unset { path } => path,
        }
    }
}

// ── JSON codec ────────────────────────────────────────────────────────────

/// Decode an ops array from its JSON wire form.
pub fn ops_from_json(json: &str) -> Result<Vec<PatchOp>, OpsCodecError> {
    Ok(serde_json::from_str(json)?)
}

/// Encode an ops array to its JSON wire form.
pub fn ops_to_json(ops: &[PatchOp]) -> Result<String, OpsCodecError> {
    Ok(serde_json::to_string(ops)?)
}
