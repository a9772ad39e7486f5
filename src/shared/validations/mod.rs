//! Field validators for time-of-day and calendar-date strings.

use chrono::{Datelike, NaiveDate};

/// `true` iff `value`, with surrounding whitespace trimmed, is exactly `HH:MM`
/// in 24-hour form (00:00 through 23:59).
pub fn is_valid_time(value: &str) -> bool {
    let bytes = value.trim().as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }

    let (Some(hour), Some(minute)) = (two_digits(&bytes[0..2]), two_digits(&bytes[3..5])) else {
        return false;
    };

    hour <= 23 && minute <= 59
}

/// `true` iff `value` is exactly `YYYY-MM-DD` and names a real calendar date.
pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// The parsed date is decomposed again and compared with the input numerals,
/// so a value that a lenient parser would roll over (`2023-02-30` into March)
/// is rejected instead of normalized.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
    {
        return None;
    }

    let year: i32 = value[0..4].parse().ok()?;
    let month: u32 = value[5..7].parse().ok()?;
    let day: u32 = value[8..10].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    if date.year() != year || date.month() != month || date.day() != day {
        return None;
    }

    Some(date)
}

fn two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}
