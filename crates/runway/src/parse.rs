//! The runway text parser: three independent scans merged per channel.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::scan::{
    channel_number, find_as_of_date, normalize_channel_code, parse_flexible_date, split_csv_line,
};
use crate::types::{ChannelRunway, RunwayReport, ScheduleItem, ScheduleKind};

static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#{2,4}\s*(ch\s*[0-9]+)\s*[：:]?\s*(.*)$").expect("heading regex")
});

static BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[*\-・]\s*\*\*\s*([^（()]+?)\s*(?:[（(]([^）)]*)[）)])?\s*\*\*\s*[：:]\s*(.*)$")
        .expect("bullet regex")
});

const NO_DATA_ERROR: &str = "チャンネル情報が見つかりませんでした。channel_id,last_scheduled を含むCSV、`| ch06 | ... |` 形式のテーブル行、または `### ch06：` セクションと日付付き箇条書きを貼り付けてください。";

/// Classify a bullet label. 公開予約 is checked before 公開 because every
/// reservation label also contains the plain 公開 substring.
pub(crate) fn classify_label(label: &str) -> ScheduleKind {
    if label.contains("公開予約") {
        ScheduleKind::Scheduled
    } else if label.contains("公開") {
        ScheduleKind::Published
    } else {
        ScheduleKind::Unknown
    }
}

/// Parse pasted runway text into a per-channel report.
///
/// `channel_names` maps normalized codes (`CH06`) to display names and is
/// used purely for enrichment; unknown channels still parse. The function
/// never fails: unusable rows are skipped, and an empty result is reported
/// through [`RunwayReport::errors`].
pub fn parse_runway_text(
    text: &str,
    channel_names: &HashMap<String, String>,
) -> RunwayReport {
    let lines: Vec<&str> = text.lines().collect();
    let mut builders: BTreeMap<String, ChannelBuilder> = BTreeMap::new();

    scan_csv_section(&lines, &mut builders);
    scan_table_rows(&lines, &mut builders);
    scan_channel_sections(&lines, &mut builders);

    let mut report = RunwayReport {
        base_date: find_as_of_date(text),
        ..RunwayReport::default()
    };

    if builders.is_empty() {
        report.errors.push(NO_DATA_ERROR.to_string());
        return report;
    }

    let mut channels: Vec<ChannelRunway> = builders
        .into_iter()
        .map(|(code, builder)| builder.finish(code, channel_names))
        .collect();
    channels.sort_by_key(|ch| channel_number(&ch.code));
    report.channels = channels;
    report
}

// ── Per-channel accumulator ───────────────────────────────────────────────

#[derive(Default)]
struct ChannelBuilder {
    name: Option<String>,
    table_last_published: Option<NaiveDate>,
    table_last_scheduled: Option<NaiveDate>,
    items: Vec<ScheduleItem>,
}

impl ChannelBuilder {
    fn note_name(&mut self, name: &str) {
        let name = name.trim();
        if self.name.is_none() && !name.is_empty() {
            self.name = Some(name.to_string());
        }
    }

    /// Table/CSV dates beat bullet-derived ones; among table sources the
    /// first writer wins.
    fn note_table_dates(&mut self, published: Option<NaiveDate>, scheduled: Option<NaiveDate>) {
        self.table_last_published = self.table_last_published.or(published);
        self.table_last_scheduled = self.table_last_scheduled.or(scheduled);
    }

    fn finish(self, code: String, channel_names: &HashMap<String, String>) -> ChannelRunway {
        // Bullet-derived maxima fill gaps only. Unknown-kind items are
        // excluded: a label naming neither 公開 nor 公開予約 is no evidence
        // the entry counts toward the runway.
        let max_by_kind = |kind: ScheduleKind| {
            self.items
                .iter()
                .filter(|item| item.kind == kind)
                .map(|item| item.date)
                .max()
        };
        let last_published = self
            .table_last_published
            .or_else(|| max_by_kind(ScheduleKind::Published));
        let last_scheduled = self
            .table_last_scheduled
            .or_else(|| max_by_kind(ScheduleKind::Scheduled));
        let name = channel_names.get(&code).cloned().or(self.name);
        ChannelRunway {
            code,
            name,
            last_published,
            last_scheduled,
            items: self.items,
        }
    }
}

fn builder<'a>(
    builders: &'a mut BTreeMap<String, ChannelBuilder>,
    code: String,
) -> &'a mut ChannelBuilder {
    builders.entry(code).or_default()
}

// ── Scan 1: CSV summary section ───────────────────────────────────────────

struct CsvColumns {
    channel_id: usize,
    name: Option<usize>,
    last_published: Option<usize>,
    last_scheduled: usize,
}

fn csv_header_columns(cells: &[String]) -> Option<CsvColumns> {
    let index_of = |wanted: &[&str]| {
        cells
            .iter()
            .position(|c| wanted.contains(&c.to_ascii_lowercase().as_str()))
    };
    Some(CsvColumns {
        channel_id: index_of(&["channel_id"])?,
        name: index_of(&["channel_name", "name"]),
        last_published: index_of(&["last_published"]),
        last_scheduled: index_of(&["last_scheduled"])?,
    })
}

fn scan_csv_section(lines: &[&str], builders: &mut BTreeMap<String, ChannelBuilder>) {
    let mut iter = lines.iter();
    let columns = loop {
        let Some(line) = iter.next() else { return };
        let cells = split_csv_line(line);
        if cells.len() >= 2 {
            if let Some(columns) = csv_header_columns(&cells) {
                break columns;
            }
        }
    };

    for line in iter {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("```") {
            break;
        }
        let cells = split_csv_line(line);
        let Some(code) = cells
            .get(columns.channel_id)
            .and_then(|cell| normalize_channel_code(cell))
        else {
            // Non-matching row terminates the section.
            break;
        };
        let cell_date = |idx: Option<usize>| {
            idx.and_then(|i| cells.get(i)).and_then(|cell| {
                let date = parse_flexible_date(cell);
                if date.is_none() && !cell.is_empty() {
                    debug!(cell = %cell, "skipping unparseable CSV date cell");
                }
                date
            })
        };
        let published = cell_date(columns.last_published);
        let scheduled = cell_date(Some(columns.last_scheduled));
        let b = builder(builders, code);
        if let Some(idx) = columns.name {
            if let Some(name) = cells.get(idx) {
                b.note_name(name);
            }
        }
        b.note_table_dates(published, scheduled);
    }
}

// ── Scan 2: markdown table rows ───────────────────────────────────────────

fn scan_table_rows(lines: &[&str], builders: &mut BTreeMap<String, ChannelBuilder>) {
    for line in lines {
        let trimmed = line.trim();
        if !trimmed.starts_with('|') {
            continue;
        }
        if trimmed.contains("---") {
            continue; // separator row
        }
        let cells: Vec<&str> = trimmed
            .trim_matches('|')
            .split('|')
            .map(str::trim)
            .collect();
        if cells.len() < 4 {
            continue;
        }
        let Some(code) = normalize_channel_code(cells[0]) else {
            continue; // header row or prose
        };
        let published = parse_flexible_date(cells[2]);
        let scheduled = parse_flexible_date(cells[3]);
        if published.is_none() && scheduled.is_none() {
            debug!(row = %trimmed, "table row for {code} carries no parseable dates");
        }
        let b = builder(builders, code);
        b.note_name(cells[1]);
        b.note_table_dates(published, scheduled);
    }
}

// ── Scan 3: channel sections with dated bullets ───────────────────────────

fn scan_channel_sections(lines: &[&str], builders: &mut BTreeMap<String, ChannelBuilder>) {
    let mut current: Option<String> = None;
    for line in lines {
        let trimmed = line.trim();
        if let Some(caps) = HEADING_RE.captures(trimmed) {
            match normalize_channel_code(&caps[1]) {
                Some(code) => {
                    let b = builder(builders, code.clone());
                    b.note_name(&caps[2]);
                    current = Some(code);
                }
                None => current = None,
            }
            continue;
        }
        let Some(code) = current.as_ref() else {
            continue;
        };
        let Some(caps) = BULLET_RE.captures(trimmed) else {
            continue;
        };
        let Some(date) = parse_flexible_date(&caps[1]) else {
            debug!(line = %trimmed, "skipping bullet with unparseable date");
            continue;
        };
        let label = caps.get(2).map(|m| m.as_str().trim().to_string());
        let kind = label
            .as_deref()
            .map(classify_label)
            .unwrap_or(ScheduleKind::Unknown);
        let title = caps[3].trim().to_string();
        builder(builders, code.clone()).items.push(ScheduleItem {
            date,
            kind,
            title,
            label,
        });
    }
}
