//! Low-level scanning helpers: channel codes, flexible dates, CSV rows.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bch\s*([0-9]+)").expect("channel code regex"));

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})[/\-.年]\s*([0-9]{1,2})[/\-.月]\s*([0-9]{1,2})日?")
        .expect("date regex")
});

/// Normalize any channel mention to uppercase `CH` + zero-padded digits.
///
/// `ch6`, `CH06` and `ch  06` all normalize to `CH06`; text with no channel
/// mention yields `None`.
///
/// # Examples
///
/// ```
/// use pipedash_runway::normalize_channel_code;
///
/// assert_eq!(normalize_channel_code("ch6").as_deref(), Some("CH06"));
/// assert_eq!(normalize_channel_code("### CH06：都市伝説").as_deref(), Some("CH06"));
/// assert_eq!(normalize_channel_code("都市伝説"), None);
/// ```
pub fn normalize_channel_code(raw: &str) -> Option<String> {
    let caps = CODE_RE.captures(raw)?;
    let n: u64 = caps[1].parse().ok()?;
    Some(format!("CH{n:02}"))
}

/// Numeric part of a normalized code, for numeric channel ordering.
pub(crate) fn channel_number(code: &str) -> u64 {
    code.trim_start_matches(|c: char| !c.is_ascii_digit())
        .parse()
        .unwrap_or(0)
}

/// Parse the first date mention in `raw`, accepting `2026/1/5`,
/// `2026-01-05`, `2026.1.5` and `2026年1月5日`. Invalid calendar dates
/// (month 13, Feb 30) yield `None`.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(raw)?;
    date_from_captures(&caps)
}

/// Find the "as of" anchor: the first date immediately followed by 時点.
pub(crate) fn find_as_of_date(text: &str) -> Option<NaiveDate> {
    for caps in DATE_RE.captures_iter(text) {
        let whole = caps.get(0).expect("group 0");
        let rest = text[whole.end()..].trim_start();
        if rest.starts_with("時点") {
            if let Some(date) = date_from_captures(&caps) {
                return Some(date);
            }
        }
    }
    None
}

fn date_from_captures(caps: &regex::Captures<'_>) -> Option<NaiveDate> {
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Split one CSV line into trimmed cells, honoring double-quote escaping
/// (`"a,b"` is one cell, `""` inside quotes is a literal quote).
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                cells.push(cell.trim().to_string());
                cell.clear();
            }
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}
