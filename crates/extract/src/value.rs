//! Lenient value parsing for metadata strings.
//!
//! Everything here degrades to `None`: upstream metadata is heterogeneous and
//! often malformed, and a bad value must only cost the field it belongs to.
//! Values that are present but unparseable are reported with `warn!` so they
//! show up in logs without failing the extraction.
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y:%m:%d %H:%M:%S",
];

/// Trims `raw` (after dropping control characters when `strip_control` is
/// set); `None` if nothing is left.
pub fn clean_text(raw: &str, strip_control: bool) -> Option<String> {
    let filtered: String = if strip_control {
        raw.chars().filter(|c| !c.is_control()).collect()
    } else {
        raw.to_string()
    };
    let trimmed = filtered.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Numeric types a typed slot can hold.
///
/// Floats must be finite: `NaN` and infinities are not values a record can
/// compare or serialize.
pub trait Number: FromStr {
    fn is_finite(&self) -> bool {
        true
    }
}

macro_rules! integer_number {
    ($($t:ty),*) => {
        $(impl Number for $t {})*
    };
}

integer_number!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Number for f32 {
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl Number for f64 {
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

/// Parses a number, tolerating a trailing unit (`"44100 Hz"`, `"12 pages"`).
pub fn parse_number<T: Number>(field: &str, raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<T>().ok().or_else(|| {
        let end = trimmed
            .char_indices()
            .find(|&(i, c)| {
                !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+')))
            })
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        trimmed[..end].parse::<T>().ok()
    });
    match parsed {
        Some(value) if value.is_finite() => Some(value),
        _ => {
            warn!(field, value = trimmed, "malformed_number");
            None
        }
    }
}

/// Parses a number that may be written as a fraction (`"1/80"`), as EXIF
/// exposure times often are.
pub fn parse_rational(field: &str, raw: &str) -> Option<f64> {
    let Some((num, den)) = raw.trim().split_once('/') else {
        return parse_number(field, raw);
    };
    match (num.trim().parse::<f64>(), den.trim().parse::<f64>()) {
        (Ok(num), Ok(den)) if den != 0.0 && (num / den).is_finite() => Some(num / den),
        _ => {
            warn!(field, value = raw.trim(), "malformed_number");
            None
        }
    }
}

/// Parses `true/false/yes/no/1/0` in any case.
pub fn parse_bool(field: &str, raw: &str) -> Option<bool> {
    let trimmed = raw.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => None,
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => {
            warn!(field, value = trimmed, "malformed_boolean");
            None
        }
    }
}

/// Parses the date layouts seen in document metadata; naive values are UTC.
///
/// Accepted: RFC 3339, RFC 2822, ISO date-times without offset, EXIF
/// `YYYY:MM:DD HH:MM:SS`, `YYYY-MM-DD`, `YYYY-MM` and a bare year.
pub fn parse_date(field: &str, raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d"))
        .ok()
        .or_else(|| {
            (trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()))
                .then(|| trimmed.parse().ok())
                .flatten()
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        });
    match date.and_then(|d| d.and_hms_opt(0, 0, 0)) {
        Some(naive) => Some(naive.and_utc()),
        None => {
            warn!(field, value = trimmed, "malformed_date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, TimeZone, Timelike};

    use super::*;

    #[test]
    fn clean_text_trims_and_drops_blank() {
        assert_eq!(clean_text("  Report \n", true), Some("Report".into()));
        assert_eq!(clean_text(" \t ", true), None);
        assert_eq!(clean_text("a\u{0007}b", true), Some("ab".into()));
        assert_eq!(clean_text("a\u{0007}b", false), Some("a\u{0007}b".into()));
    }

    #[test]
    fn numbers_tolerate_units() {
        assert_eq!(parse_number::<u64>("Content-Length", " 12345 "), Some(12345));
        assert_eq!(parse_number::<u32>("samplerate", "44100 Hz"), Some(44100));
        assert_eq!(parse_number::<f64>("xmpDM:duration", "183.5"), Some(183.5));
        assert_eq!(parse_number::<i32>("offset", "-3px"), Some(-3));
    }

    #[test]
    fn malformed_numbers_are_absent() {
        assert_eq!(parse_number::<u64>("Content-Length", "unknown"), None);
        assert_eq!(parse_number::<u64>("Content-Length", ""), None);
        assert_eq!(parse_number::<u32>("pages", "-4"), None);
    }

    #[test]
    fn rationals() {
        assert_eq!(parse_rational("exif:ExposureTime", "1/80"), Some(0.0125));
        assert_eq!(parse_rational("exif:ExposureTime", "0.004"), Some(0.004));
        assert_eq!(parse_rational("exif:ExposureTime", "1/0"), None);
        assert_eq!(parse_rational("exif:ExposureTime", "a/b"), None);
        assert_eq!(parse_rational("exif:ExposureTime", "NaN/2"), None);
        assert_eq!(parse_rational("exif:ExposureTime", "inf"), None);
    }

    #[test]
    fn non_finite_floats_are_malformed() {
        for raw in ["NaN", "nan", "inf", "-inf", "infinity", "1e400", "-1e400"] {
            assert_eq!(parse_number::<f64>("xmpDM:duration", raw), None, "{raw}");
        }
        assert_eq!(parse_number::<f32>("xmpDM:videoFrameRate", "1e40"), None);
        assert_eq!(parse_number::<f64>("geo:alt", "1e3"), Some(1000.0));
        assert_eq!(parse_number::<u64>("Content-Length", "NaN"), None);
    }

    #[test]
    fn booleans() {
        assert_eq!(parse_bool("pdf:encrypted", "TRUE"), Some(true));
        assert_eq!(parse_bool("pdf:encrypted", "no"), Some(false));
        assert_eq!(parse_bool("pdf:encrypted", "sometimes"), None);
    }

    #[test]
    fn date_layouts() {
        let expected = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
        for raw in [
            "2021-03-04T05:06:07Z",
            "2021-03-04T06:06:07+01:00",
            "Thu, 04 Mar 2021 05:06:07 +0000",
            "2021-03-04T05:06:07",
            "2021-03-04 05:06:07",
            "2021:03:04 05:06:07",
        ] {
            assert_eq!(parse_date("date", raw), Some(expected), "layout {raw}");
        }

        let day = parse_date("date", "2021-03-04").expect("date only");
        assert_eq!((day.year(), day.month(), day.day(), day.hour()), (2021, 3, 4, 0));

        let month = parse_date("date", "2021-03").expect("year-month");
        assert_eq!((month.year(), month.month(), month.day()), (2021, 3, 1));

        let year = parse_date("date", "1999").expect("year");
        assert_eq!((year.year(), year.month(), year.day()), (1999, 1, 1));
    }

    #[test]
    fn malformed_dates_are_absent() {
        assert_eq!(parse_date("date", "last tuesday"), None);
        assert_eq!(parse_date("date", "2021-13-45"), None);
        assert_eq!(parse_date("date", "   "), None);
    }
}
