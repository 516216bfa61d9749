//! `$date` literal parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Number, Value};

use crate::error::{NormalizeError, NormalizeResult};

/// Key of the canonical extended-JSON 64-bit integer wrapper
pub const NUMBER_LONG_KEY: &str = "$numberLong";

/// Largest distance from the epoch a date instant may have, in milliseconds
pub const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// Offset-less layouts, read as UTC. `%.f` also matches a missing fraction.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// `2023-01-01T10:30+02:00`
const MINUTE_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";

/// Parse the payload of a `{"$date": ...}` wrapper into an instant.
///
/// Accepted payloads:
/// - RFC 3339 strings (`2023-01-01T00:00:00.000Z`, `2023-01-01T02:00:00+02:00`)
/// - ISO date-times without an offset and plain calendar dates, both as UTC
/// - minute-precision date-times with `Z` or a `+hh:mm` offset
/// - numbers, as milliseconds since the Unix epoch
/// - `{"$numberLong": "<millis>"}`
pub fn parse_date_literal(literal: &Value) -> NormalizeResult<DateTime<Utc>> {
    match literal {
        Value::String(text) => parse_date_text(text)
            .ok_or_else(|| NormalizeError::invalid_date(literal, "unrecognized date format")),
        Value::Number(number) => millis_from_number(number)
            .ok_or_else(|| NormalizeError::invalid_date(literal, "not a finite millisecond count"))
            .and_then(|millis| instant_from_millis(literal, millis)),
        Value::Object(map) => match map.get(NUMBER_LONG_KEY) {
            Some(Value::String(millis)) => {
                let millis = millis.trim().parse::<i64>().map_err(|e| {
                    NormalizeError::invalid_date(literal, format!("bad $numberLong: {}", e))
                })?;
                instant_from_millis(literal, millis)
            }
            _ => Err(NormalizeError::invalid_date(
                literal,
                "expected {\"$numberLong\": \"<millis>\"}",
            )),
        },
        _ => Err(NormalizeError::invalid_date(
            literal,
            "expected a string or a number",
        )),
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    if let Some(naive) = parse_naive(text) {
        return Some(naive.and_utc());
    }

    // minute precision with an offset, which RFC 3339 does not allow
    if let Some(naive) = text.strip_suffix(['Z', 'z']).and_then(parse_naive) {
        return Some(naive.and_utc());
    }
    if let Ok(instant) = DateTime::parse_from_str(text, MINUTE_OFFSET_FORMAT) {
        return Some(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

fn millis_from_number(number: &Number) -> Option<i64> {
    if let Some(millis) = number.as_i64() {
        return Some(millis);
    }
    // u64 beyond i64 and floats; fractional milliseconds are dropped
    let millis = number.as_f64()?.trunc();
    if millis.is_finite() && millis.abs() <= MAX_EPOCH_MILLIS as f64 {
        Some(millis as i64)
    } else {
        None
    }
}

fn instant_from_millis(literal: &Value, millis: i64) -> NormalizeResult<DateTime<Utc>> {
    if millis.abs() > MAX_EPOCH_MILLIS {
        return Err(NormalizeError::invalid_date(
            literal,
            "outside the representable date range",
        ));
    }
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        NormalizeError::invalid_date(literal, "outside the representable date range")
    })
}
