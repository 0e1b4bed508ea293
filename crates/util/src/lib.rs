//! pipedash-util - JSON value helpers shared by the pipedash core crates.
//!
//! Override payloads and editor snapshots are plain JSON values; the helpers
//! here define the one notion of value equality the rest of the workspace
//! agrees on.

pub mod blank;
pub mod json_equal;

// Re-exports for convenience
pub use blank::is_blank_value;
pub use json_equal::{deep_equal, leaf_map_equal};
