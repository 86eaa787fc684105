//! Lenient publication-date parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::raw::RawDate;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Unix timestamps above this are treated as milliseconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Parses a raw date into UTC. Naive values are taken as UTC; bare dates as midnight.
pub fn parse_published_at(raw: &RawDate) -> Option<DateTime<Utc>> {
    match raw {
        RawDate::Timestamp(ts) => from_unix(*ts),
        RawDate::Text(text) => parse_date_text(text),
    }
}

pub fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Some(date) = parse_naive_date(text) {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    if text.bytes().all(|b| b.is_ascii_digit()) && text.len() >= 9 {
        return text.parse::<i64>().ok().and_then(from_unix);
    }

    None
}

fn parse_naive_date(text: &str) -> Option<NaiveDate> {
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }
    // Year-month only ("2024-05") resolves to the first of the month.
    if text.len() == 7 && text.as_bytes()[4] == b'-' {
        return NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok();
    }
    None
}

fn from_unix(ts: i64) -> Option<DateTime<Utc>> {
    if ts <= 0 {
        return None;
    }
    if ts >= MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
