//! Date helper functions

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Ordering;

/// Formats that carry an explicit offset
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Formats without an offset, read as UTC
const NAIVE_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Parse a front-matter date string in the formats browsers accept
/// for content dates. Returns `None` for anything else.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    // Year-month and bare year
    let all_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    match s.split_once('-') {
        Some((year, month)) if year.len() == 4 && month.len() == 2 => {
            if !all_digits(year) || !all_digits(month) {
                return None;
            }
            let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?;
            date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
        }
        None if s.len() == 4 && all_digits(s) => {
            let date = NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1)?;
            date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
        }
        _ => None,
    }
}

/// Sort key of a post date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKey {
    /// No date at all
    Missing,
    /// A date string that could not be parsed; ranks as the oldest possible date
    Unparseable,
    At(DateTime<Utc>),
}

impl DateKey {
    /// Only the empty string is missing; blank text is an unparseable date
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            DateKey::Missing
        } else {
            parse_date(s).map_or(DateKey::Unparseable, DateKey::At)
        }
    }

    /// Newest first. Unparseable dates follow every valid one and missing
    /// dates come last.
    pub fn cmp_newest(&self, other: &Self) -> Ordering {
        use DateKey::*;
        match (self, other) {
            (At(a), At(b)) => b.cmp(a),
            (At(_), _) => Ordering::Less,
            (_, At(_)) => Ordering::Greater,
            (Unparseable, Missing) => Ordering::Less,
            (Missing, Unparseable) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    /// Oldest first. Unparseable dates lead and missing dates come last.
    pub fn cmp_oldest(&self, other: &Self) -> Ordering {
        use DateKey::*;
        match (self, other) {
            (Missing, Missing) | (Unparseable, Unparseable) => Ordering::Equal,
            (Missing, _) => Ordering::Greater,
            (_, Missing) => Ordering::Less,
            (Unparseable, _) => Ordering::Less,
            (_, Unparseable) => Ordering::Greater,
            (At(a), At(b)) => a.cmp(b),
        }
    }
}

/// Format a post date for display in `lang`.
///
/// Empty dates give an empty string, unparseable ones are returned as-is.
///
/// # Examples
/// ```ignore
/// format_date("2024-01-15", "en") // -> "January 15, 2024"
/// format_date("2024-01-15", "zh") // -> "2024年1月15日"
/// ```
pub fn format_date(date: &str, lang: &str) -> String {
    if date.trim().is_empty() {
        return String::new();
    }

    let Some(dt) = parse_date(date) else {
        return date.to_string();
    };

    match lang.to_lowercase().as_str() {
        "zh" => format!("{}年{}月{}日", dt.year(), dt.month(), dt.day()),
        "fr" => format!(
            "{} {} {}",
            dt.day(),
            FRENCH_MONTHS[dt.month0() as usize],
            dt.year()
        ),
        _ => dt.format("%B %-d, %Y").to_string(),
    }
}
