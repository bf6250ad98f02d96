use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use strum_macros::Display;

use super::error::InputError;

/// Date-time layouts tried after RFC 3339, for inputs carrying an explicit offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

/// Offset-less layouts, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%B %d %Y %H:%M",
    "%B %d, %Y %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%d %b %Y",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    /// Case-insensitive. Accepts full names, plurals and the usual abbreviations.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "second" | "seconds" | "sec" | "secs" => Some(TimeUnit::Second),
            "minute" | "minutes" | "min" | "mins" => Some(TimeUnit::Minute),
            "hour" | "hours" | "hr" | "hrs" => Some(TimeUnit::Hour),
            "day" | "days" => Some(TimeUnit::Day),
            _ => None,
        }
    }

    pub fn seconds(&self) -> i64 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Minute => 60,
            TimeUnit::Hour => 3600,
            TimeUnit::Day => 86_400,
        }
    }
}

/// Converts fractional seconds into a chrono duration with microsecond resolution.
pub fn duration_from_seconds(seconds: f64) -> Option<Duration> {
    if !seconds.is_finite() {
        return None;
    }
    let micros = (seconds * 1e6).round();
    if micros.abs() > i64::MAX as f64 {
        return None;
    }
    Some(Duration::microseconds(micros as i64))
}

/// Parses a start/end time.
///
/// Recognized, in order: `now` / `current`, relative offsets such as
/// `in 2 hours`, then absolute dates. Absolute inputs with an offset are
/// converted to UTC; inputs without one are taken as UTC already.
pub fn parse_time(text: &str) -> Result<DateTime<Utc>, InputError> {
    let raw = text.trim();
    let lower = raw.to_lowercase();

    if lower == "now" || lower == "current" {
        return Ok(Utc::now());
    }

    if let Some(offset) = parse_relative_offset(&lower) {
        return Ok(Utc::now() + offset);
    }

    parse_absolute(raw).ok_or_else(|| InputError::Time {
        input: raw.to_string(),
        reason: "expected 'now', 'in <n> <unit>' or an ISO-8601 date".to_string(),
    })
}

fn parse_relative_offset(lower: &str) -> Option<Duration> {
    let rest = lower.strip_prefix("in ")?;
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }

    let amount: i64 = parts[0].parse().ok()?;
    let unit = TimeUnit::from_token(parts[1])?;
    Duration::try_seconds(amount.checked_mul(unit.seconds())?)
}

fn parse_absolute(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    if let Ok(system_time) = humantime::parse_rfc3339_weak(raw) {
        return Some(DateTime::<Utc>::from(system_time));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

/// Parses a duration into seconds.
///
/// A bare integer is read as minutes. Anything else must be
/// `<number> <unit>`.
pub fn parse_duration(text: &str) -> Result<f64, InputError> {
    let lower = text.trim().to_lowercase();
    let err = |reason: String| InputError::Duration {
        input: lower.clone(),
        reason,
    };

    if let Ok(minutes) = lower.parse::<i64>() {
        return Ok(minutes as f64 * 60.0);
    }

    let parts: Vec<&str> = lower.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(err("duration must include a unit".to_string()));
    }

    let amount = parts[0]
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| err(format!("invalid amount: {}", parts[0])))?;
    let unit = TimeUnit::from_token(parts[1])
        .ok_or_else(|| err(format!("unknown time unit: {}", parts[1])))?;

    log::debug!("parsed duration '{}' as {} {}", lower, amount, unit);
    Ok(amount * unit.seconds() as f64)
}
