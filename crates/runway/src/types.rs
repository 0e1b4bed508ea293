//! Parsed runway data model.

use chrono::NaiveDate;
use serde::Serialize;

/// Classification of a dated bullet item by its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    /// Label contains 公開予約 (publish reservation).
    Scheduled,
    /// Label contains 公開 but not 公開予約.
    Published,
    /// Label gives no evidence either way.
    Unknown,
}

/// One dated entry from a channel section's bullet list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleItem {
    pub date: NaiveDate,
    pub kind: ScheduleKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Per-channel merge of everything the text said about one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRunway {
    /// Normalized channel code, `CH` + zero-padded digits.
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub last_published: Option<NaiveDate>,
    pub last_scheduled: Option<NaiveDate>,
    pub items: Vec<ScheduleItem>,
}

impl ChannelRunway {
    pub fn new(code: String) -> Self {
        Self {
            code,
            name: None,
            last_published: None,
            last_scheduled: None,
            items: Vec::new(),
        }
    }

    /// Days of already-scheduled content remaining as of `as_of`. Negative
    /// spans clamp to zero; a channel with no scheduled date has no runway.
    pub fn runway_days(&self, as_of: NaiveDate) -> Option<i64> {
        self.last_scheduled
            .map(|last| (last - as_of).num_days().max(0))
    }
}

/// The full parse result. Never an `Err`: failures are strings in
/// `errors`/`warnings` so callers can show partial data alongside them.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RunwayReport {
    pub base_date: Option<NaiveDate>,
    pub channels: Vec<ChannelRunway>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}
