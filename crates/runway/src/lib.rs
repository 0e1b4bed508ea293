//! pipedash-runway — parser for pasted publishing-runway reports.
//!
//! Operators paste loosely-structured status text into the runway page:
//! CSV summary blocks, markdown tables, `### chNN：` sections with dated
//! bullet items, in any mix. [`parse_runway_text`] turns that into a
//! normalized per-channel view without ever failing hard — bad rows are
//! skipped, and "nothing recognizable" is reported through the
//! [`RunwayReport::errors`] vector so the page can render a banner next to
//! whatever partial data did parse.

pub mod cli;
pub mod parse;
pub mod scan;
pub mod types;

pub use parse::parse_runway_text;
pub use scan::{normalize_channel_code, parse_flexible_date, split_csv_line};
pub use types::{ChannelRunway, RunwayReport, ScheduleItem, ScheduleKind};
