//! `leaf-diff` — command-line glue for the leaf-map differ.
//!
//! Reads the base snapshot from stdin and the current snapshot from the
//! first argument, both as flat JSON objects, and prints the ops array that
//! transforms one into the other.

use serde_json::Value;
use thiserror::Error;

use crate::diff::diff;
use crate::types::LeafMap;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a flat JSON object of leaf overrides")]
    NotAnObject,
}

/// Parse a flat JSON object into a [`LeafMap`].
pub fn leaf_map_from_json(json: &str) -> Result<LeafMap, CliError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(obj) = value else {
        return Err(CliError::NotAnObject);
    };
    Ok(obj.into_iter().collect())
}

/// Diff two flat JSON objects, returning the ops array as pretty JSON.
pub fn diff_json(base_json: &str, current_json: &str) -> Result<String, CliError> {
    let base = leaf_map_from_json(base_json)?;
    let current = leaf_map_from_json(current_json)?;
    let ops = diff(&base, &current);
    Ok(serde_json::to_string_pretty(&ops)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_json_emits_ops_array() {
        let out = diff_json(r#"{"a": 1}"#, r#"{"a": 2, "b": 3}"#).unwrap();
        let ops: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0]["op"], "set");
        assert_eq!(ops[0]["path"], "a");
    }

    #[test]
    fn non_object_input_is_rejected() {
        assert!(matches!(
            diff_json("[1, 2]", "{}"),
            Err(CliError::NotAnObject)
        ));
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(diff_json("{", "{}"), Err(CliError::Json(_))));
    }
}
