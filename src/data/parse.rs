use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::foundation::error::{ScrollyError, ScrollyResult};

/// Parse the longest leading decimal literal of `s`; `NaN` when there is none.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"42.5%"` yields `42.5` and
/// `"abc"` yields `NaN`.
pub fn parse_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    if s[i..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        if mantissa_digits > 0 {
            i = j;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    s[..i].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse the leading base-10 integer of `s`; `NaN` when there is none.
///
/// Returned as `f64` so an unparsable field stays representable, matching [`parse_float`].
pub fn parse_int(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return f64::NAN;
    }
    s[..i].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a date field as a UTC instant.
///
/// Accepts RFC 3339, `YYYY-MM-DD[THH:MM[:SS]]`, `YYYY/MM/DD`, `YYYY-MM`, and `YYYY`. Date-only and
/// zone-less forms are taken as UTC.
pub fn parse_date(s: &str) -> ScrollyResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt.and_utc());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d.and_time(chrono::NaiveTime::MIN).and_utc());
        }
    }

    let ym = s.split_once('-');
    let (year, month) = match ym {
        Some((y, m)) => (y, m),
        None => (s, "1"),
    };
    if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
        if let (Ok(y), Ok(m)) = (year.parse::<i32>(), month.parse::<u32>()) {
            if let Some(d) = NaiveDate::from_ymd_opt(y, m, 1) {
                return Ok(d.and_time(chrono::NaiveTime::MIN).and_utc());
            }
        }
    }

    Err(ScrollyError::data(format!("invalid date '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn float_parses_numeric_prefix() {
        assert_eq!(parse_float("42.5"), 42.5);
        assert_eq!(parse_float("  -7.5e1xyz"), -75.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("3."), 3.0);
        assert_eq!(parse_float("12e"), 12.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("").is_nan());
        assert!(parse_float("-.").is_nan());
    }

    #[test]
    fn int_truncates_at_first_non_digit() {
        assert_eq!(parse_int("3"), 3.0);
        assert_eq!(parse_int("12.9"), 12.0);
        assert_eq!(parse_int(" -4 songs"), -4.0);
        assert!(parse_int("x1").is_nan());
        assert!(parse_int("").is_nan());
    }

    #[test]
    fn dates_are_utc() {
        let d = parse_date("2020-01-01").unwrap();
        assert_eq!((d.year(), d.month(), d.day(), d.hour()), (2020, 1, 1, 0));

        let y = parse_date("2015").unwrap();
        assert_eq!((y.year(), y.month(), y.day()), (2015, 1, 1));

        let ym = parse_date("2015-06").unwrap();
        assert_eq!(ym.month(), 6);

        let z = parse_date("2020-01-01T09:00:00+09:00").unwrap();
        assert_eq!(z.hour(), 0);

        assert!(parse_date("yesterday").is_err());
    }
}
