//! Building values from JSON and YAML documents.
//!
//! JSON maps one-to-one onto `None`, booleans, numbers, text, lists and
//! dicts. YAML adds tags for the types JSON cannot spell:
//!
//! | tag | value |
//! |---|---|
//! | `!tuple [..]` | tuple |
//! | `!set [..]`, `!frozenset [..]` | set, frozenset |
//! | `!bytes "..."` | byte string (UTF-8 of the text) |
//! | `!regex "..."` | compiled pattern |
//! | `!timestamp "..."` | RFC 3339 timestamp, or a naive one taken as UTC |
//! | `!duration 61.5` | elapsed time in seconds |

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use regex::Regex;

use super::Value;
use crate::errors::PrettifyError;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                Value::dict(map.into_iter().map(|(k, v)| (Value::Str(k), Value::from(v))))
            }
        }
    }
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = PrettifyError;

    fn try_from(yaml: serde_yaml::Value) -> Result<Self, PrettifyError> {
        match yaml {
            serde_yaml::Value::Null => Ok(Value::None),
            serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_yaml::Value::Number(n) => Ok(match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            serde_yaml::Value::String(s) => Ok(Value::Str(s)),
            serde_yaml::Value::Sequence(items) => Ok(Value::list(convert_items(items)?)),
            serde_yaml::Value::Mapping(map) => {
                let entries = map
                    .into_iter()
                    .map(|(k, v)| Ok((Value::try_from(k)?, Value::try_from(v)?)))
                    .collect::<Result<Vec<_>, PrettifyError>>()?;
                Ok(Value::dict(entries))
            }
            serde_yaml::Value::Tagged(tagged) => {
                let tag = tagged.tag.to_string();
                convert_tagged(tag.trim_start_matches('!'), tagged.value)
            }
        }
    }
}

/// Parses a YAML (or JSON) document into a value.
///
/// # Errors
/// Returns `PrettifyError::Input` for malformed documents and unknown tags.
pub fn from_yaml_str(source: &str) -> Result<Value, PrettifyError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(source).map_err(|e| PrettifyError::input(e.to_string()))?;
    Value::try_from(yaml)
}

fn convert_items(items: Vec<serde_yaml::Value>) -> Result<Vec<Value>, PrettifyError> {
    items.into_iter().map(Value::try_from).collect()
}

fn convert_tagged(tag: &str, value: serde_yaml::Value) -> Result<Value, PrettifyError> {
    match (tag, value) {
        ("tuple", serde_yaml::Value::Sequence(items)) => Ok(Value::tuple(convert_items(items)?)),
        ("set", serde_yaml::Value::Sequence(items)) => Ok(Value::set(convert_items(items)?)),
        ("frozenset", serde_yaml::Value::Sequence(items)) => Ok(Value::frozenset(convert_items(items)?)),
        ("bytes", serde_yaml::Value::String(s)) => Ok(Value::bytes(s.into_bytes())),
        ("regex", serde_yaml::Value::String(s)) => Regex::new(&s)
            .map(Value::from)
            .map_err(|e| PrettifyError::input(format!("invalid !regex {s:?}: {e}"))),
        ("timestamp", serde_yaml::Value::String(s)) => parse_timestamp(&s),
        ("duration", serde_yaml::Value::Number(n)) => {
            let seconds = n.as_f64().unwrap_or(0.0);
            // Microsecond resolution, like the durations it stands in for.
            let micros = (seconds * 1_000_000.0).round() as i64;
            Ok(Value::Duration(TimeDelta::microseconds(micros)))
        }
        (tag, other) => Err(PrettifyError::input(format!(
            "unsupported tag !{tag} on {}",
            yaml_kind(&other)
        ))),
    }
}

fn parse_timestamp(text: &str) -> Result<Value, PrettifyError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(Value::Timestamp(ts));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(Value::from)
        .map_err(|e| PrettifyError::input(format!("invalid !timestamp {text:?}: {e}")))
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_objects_become_dicts() {
        let json: serde_json::Value = serde_json::from_str(r#"{"a": [1, 2.5, null]}"#).unwrap();
        assert_eq!(Value::from(json).repr(), "{'a': [1, 2.5, None]}");
    }

    #[test]
    fn yaml_tags_select_special_values() {
        let value = from_yaml_str("[!tuple [1, 2], !set [3, 3], !bytes ab, !duration 61]").unwrap();
        assert_eq!(value.repr(), "[(1, 2), {3}, b'ab', datetime.timedelta(seconds=61)]");
    }

    #[test]
    fn unknown_tag_is_an_input_error() {
        let err = from_yaml_str("!mystery 1").unwrap_err();
        assert!(err.to_string().contains("unsupported tag !mystery"));
    }
}
