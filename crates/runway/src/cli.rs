//! `runway-parse` — command-line glue for the runway parser.

use std::collections::HashMap;

use crate::parse::parse_runway_text;

/// Parse pasted text and render the report as pretty JSON.
///
/// The CLI has no channel-name lookup, so names come only from the text.
pub fn parse_to_json(text: &str) -> Result<String, serde_json::Error> {
    let report = parse_runway_text(text, &HashMap::new());
    serde_json::to_string_pretty(&report)
}
