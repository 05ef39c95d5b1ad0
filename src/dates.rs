// Invoice date resolution.
//
// Order of attempts:
// 1. spreadsheet serial numbers,
// 2. unambiguous text layouts (ISO, RFC 3339/2822, year-first, named months),
// 3. positional `NN/NN/YYYY` or `NN-NN-YYYY`, read per `DayOrder`.
// Anything left over resolves to `None`.
use chrono::{DateTime, Days, Months, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::types::InvoiceDate;

/// Serial day number of 1970-01-01 in the 1900 spreadsheet date system.
const SERIAL_UNIX_EPOCH: f64 = 25569.0;
const SECONDS_PER_DAY: f64 = 86400.0;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const YEAR_FIRST_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

const NAMED_MONTH_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%a %b %d %Y",
];

/// How to read the first two fields of a `NN/NN/YYYY` date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOrder {
    #[default]
    DayFirst,
    MonthFirst,
}

pub fn resolve_invoice_date(date: &InvoiceDate, order: DayOrder) -> Option<NaiveDate> {
    match date {
        InvoiceDate::Serial(v) => from_serial(*v),
        InvoiceDate::Text(s) => parse_text_date(s).or_else(|| parse_positional(s, order)),
        InvoiceDate::Missing => None,
    }
}

/// Spreadsheet serial -> calendar day (UTC). Fractional days are time of day
/// and get dropped with the rest of the time component.
pub fn from_serial(v: f64) -> Option<NaiveDate> {
    let secs = ((v - SERIAL_UNIX_EPOCH) * SECONDS_PER_DAY).floor();
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp(secs as i64, 0).map(|dt| dt.date_naive())
}

fn parse_text_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    // `%Y` takes any digit count, so `05/03/23` would read as year 5.
    if starts_with_year(s) {
        for f in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, f) {
                return Some(dt.date());
            }
        }
        for f in YEAR_FIRST_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(s, f) {
                return Some(d);
            }
        }
    }
    for f in NAMED_MONTH_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, f) {
            return Some(d);
        }
    }
    None
}

fn starts_with_year(s: &str) -> bool {
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    digits == 4
}

/// Out-of-range fields roll over into the neighbouring month or year the way
/// a calendar constructor does (`32/01/2023` is 1 February, `00/03/2023` is
/// the last day of February). Two-digit years are read as 20xx rather than
/// the 19xx a plain JavaScript `Date` would give.
fn parse_positional(s: &str, order: DayOrder) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split(['/', '-']).collect();
    if parts.len() < 3 {
        return None;
    }
    let a = leading_int(parts[0])?;
    let b = leading_int(parts[1])?;
    let mut year = leading_int(parts[2])?;
    let (day, month) = match order {
        DayOrder::DayFirst => (a, b),
        DayOrder::MonthFirst => (b, a),
    };
    if (0..100).contains(&year) {
        year += 2000;
    }
    let start = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, 1, 1)?;
    let months = month.checked_sub(1)?;
    let first_of_month = if months >= 0 {
        start.checked_add_months(Months::new(u32::try_from(months).ok()?))?
    } else {
        start.checked_sub_months(Months::new(u32::try_from(-months).ok()?))?
    };
    let days = day.checked_sub(1)?;
    if days >= 0 {
        first_of_month.checked_add_days(Days::new(u64::try_from(days).ok()?))
    } else {
        first_of_month.checked_sub_days(Days::new(u64::try_from(-days).ok()?))
    }
}

/// Leading integer of a field, ignoring whatever trails it (`"2023 10:15"`
/// reads as `2023`).
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// `DD/MM` label of a bucket day.
pub fn day_label(d: NaiveDate) -> String {
    d.format("%d/%m").to_string()
}

/// Unix milliseconds at midnight (UTC) of `d`.
pub fn day_timestamp(d: NaiveDate) -> i64 {
    d.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}
