//! Extended-JSON normalization
//!
//! Seed files carry MongoDB extended JSON: identifiers as `{"$oid": "..."}` and
//! timestamps as `{"$date": ...}`. [`normalize`] walks a parsed JSON tree and
//! replaces every such wrapper mapping with its native value.
//!
//! Precedence inside a mapping is `$oid`, then `$date`, then plain mapping. An
//! `$oid` wrapper wins even when other keys sit next to it; those keys are
//! dropped.

pub mod date;
pub mod value;

pub use date::parse_date_literal;
pub use value::Normalized;

use serde_json::{Map, Value};

use crate::error::NormalizeResult;

/// Reserved key of identifier wrappers
pub const OID_KEY: &str = "$oid";

/// Reserved key of timestamp wrappers
pub const DATE_KEY: &str = "$date";

/// Shape of a JSON mapping, decided before it is normalized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wrapper<'a> {
    /// `{"$oid": payload, ..}`
    Identifier(&'a Value),
    /// `{"$date": payload, ..}`
    Date(&'a Value),
    /// Anything else, rebuilt key by key
    Mapping(&'a Map<String, Value>),
}

impl<'a> Wrapper<'a> {
    pub fn classify(map: &'a Map<String, Value>) -> Self {
        if let Some(payload) = map.get(OID_KEY) {
            Wrapper::Identifier(payload)
        } else if let Some(payload) = map.get(DATE_KEY) {
            Wrapper::Date(payload)
        } else {
            Wrapper::Mapping(map)
        }
    }
}

/// Unwrap every `$oid` / `$date` mapping in `value`, recursively.
///
/// `$oid` payloads are returned as-is and not descended into. Fails only when a
/// `$date` payload is not a date literal.
pub fn normalize(value: &Value) -> NormalizeResult<Normalized> {
    match value {
        // arrays first: never mistaken for a wrapper
        Value::Array(items) => items
            .iter()
            .map(normalize)
            .collect::<NormalizeResult<Vec<_>>>()
            .map(Normalized::Array),
        Value::Object(map) => match Wrapper::classify(map) {
            Wrapper::Identifier(payload) => Ok(Normalized::from_plain(payload)),
            Wrapper::Date(payload) => parse_date_literal(payload).map(Normalized::DateTime),
            Wrapper::Mapping(map) => map
                .iter()
                .map(|(key, value)| normalize(value).map(|value| (key.clone(), value)))
                .collect::<NormalizeResult<Vec<_>>>()
                .map(Normalized::Object),
        },
        scalar => Ok(Normalized::from_plain(scalar)),
    }
}
