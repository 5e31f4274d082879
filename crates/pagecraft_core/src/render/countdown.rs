//! Countdown timing.
//!
//! This is the only place wall-clock time enters rendering. The target is
//! read from an `endDate` setting that may hold epoch milliseconds, an
//! RFC 3339 timestamp, or a `datetime-local` value (`YYYY-MM-DDTHH:MM`).
//! Zone-less values are interpreted in Bangladesh time (UTC+06:00).

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

const DHAKA_OFFSET_SECS: i32 = 6 * 3600;
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Clock reading used by one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub now_ms: i64,
}

impl RenderContext {
    pub fn now() -> Self {
        Self {
            now_ms: Utc::now().timestamp_millis(),
        }
    }

    pub fn at(now_ms: i64) -> Self {
        Self { now_ms }
    }
}

/// Remaining time split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Parses a countdown target into epoch milliseconds.
pub fn parse_end_date(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(number) => number.as_i64().filter(|ms| *ms > 0),
        Value::String(text) => parse_end_text(text.trim()),
        _ => None,
    }
}

fn parse_end_text(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    if let Ok(ms) = text.parse::<i64>() {
        return (ms > 0).then_some(ms);
    }
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis());
    }

    let dhaka = FixedOffset::east_opt(DHAKA_OFFSET_SECS)?;
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(23, 59, 59))
        })?;
    dhaka
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.timestamp_millis())
}

/// Time left until `end_ms`, or `None` once the target has passed.
pub fn remaining(end_ms: i64, now_ms: i64) -> Option<Remaining> {
    let left_ms = end_ms.checked_sub(now_ms)?;
    if left_ms <= 0 {
        return None;
    }
    let total_secs = left_ms / 1000;
    Some(Remaining {
        days: total_secs / 86_400,
        hours: (total_secs % 86_400) / 3_600,
        minutes: (total_secs % 3_600) / 60,
        seconds: total_secs % 60,
    })
}
