use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Number, Value};

/// A JSON tree after extended-JSON wrappers have been unwrapped.
///
/// Identical to [`serde_json::Value`] except for the extra [`Normalized::DateTime`]
/// variant produced by `$date` wrappers. Object fields keep their source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    DateTime(DateTime<Utc>),
    Array(Vec<Normalized>),
    Object(Vec<(String, Normalized)>),
}

impl Normalized {
    /// Convert a JSON value verbatim, without looking for wrappers
    pub fn from_plain(value: &Value) -> Self {
        match value {
            Value::Null => Normalized::Null,
            Value::Bool(b) => Normalized::Bool(*b),
            Value::Number(n) => Normalized::Number(n.clone()),
            Value::String(s) => Normalized::String(s.clone()),
            Value::Array(items) => Normalized::Array(items.iter().map(Self::from_plain).collect()),
            Value::Object(map) => Normalized::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Self::from_plain(value)))
                    .collect(),
            ),
        }
    }

    /// Short name of the variant, for messages
    pub fn kind(&self) -> &'static str {
        match self {
            Normalized::Null => "null",
            Normalized::Bool(_) => "boolean",
            Normalized::Number(_) => "number",
            Normalized::String(_) => "string",
            Normalized::DateTime(_) => "date",
            Normalized::Array(_) => "array",
            Normalized::Object(_) => "object",
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Normalized::Array(_))
    }

    pub fn as_array(&self) -> Option<&[Normalized]> {
        match self {
            Normalized::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<Vec<Normalized>> {
        match self {
            Normalized::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Normalized)]> {
        match self {
            Normalized::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Normalized::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Normalized::DateTime(instant) => Some(*instant),
            _ => None,
        }
    }

    /// Look up an object field by key
    pub fn get(&self, key: &str) -> Option<&Normalized> {
        self.as_object()?
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

/// Dates render as RFC 3339 strings with millisecond precision.
impl From<Normalized> for Value {
    fn from(value: Normalized) -> Self {
        match value {
            Normalized::Null => Value::Null,
            Normalized::Bool(b) => Value::Bool(b),
            Normalized::Number(n) => Value::Number(n),
            Normalized::String(s) => Value::String(s),
            Normalized::DateTime(instant) => {
                Value::String(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Normalized::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Normalized::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
