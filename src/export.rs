// Author: Dustin Pilgrim
// License: MIT

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::json;

use crate::ast::{Number, Value};

/// Convert a tree to a `serde_json::Value`.
///
/// Integers stay integers when they fit into `i64`/`u64`; every other
/// number goes through `f64`.
pub fn to_json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => json!(b),
        Value::Number(n) => number_to_json(n),
        Value::String(s) => json!(s.as_str()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_json_value).collect()),
        Value::Object(items) => serde_json::Value::Object(
            items
                .iter()
                .map(|(k, v)| (k.clone(), to_json_value(v)))
                .collect(),
        ),
    }
}

fn number_to_json(n: &Number) -> serde_json::Value {
    if n.is_integer() {
        if let Ok(i) = n.as_str().parse::<i64>() {
            return json!(i);
        }
        if let Ok(u) = n.as_str().parse::<u64>() {
            return json!(u);
        }
    }
    n.to_f64()
        .and_then(serde_json::Number::from_f64)
        .map_or(serde_json::Value::Null, serde_json::Value::Number)
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::from(i)
                } else if let Some(u) = n.as_u64() {
                    Value::from(u)
                } else {
                    n.as_f64().map_or(Value::Null, Value::from)
                }
            }
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(items) => items.into_iter().collect(),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        to_json_value(value)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => number_to_json(n).serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(items) => {
                let mut map = serializer.serialize_map(Some(items.len()))?;
                for (key, item) in items {
                    map.serialize_entry(key, item)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    #[test]
    fn test_to_json_value() {
        let value = parse_str(r#"{"n": 3, "r": 2.5, "s": "x", "a": [true, null]}"#).unwrap();
        let exported = to_json_value(&value);
        assert_eq!(
            exported,
            json!({"n": 3, "r": 2.5, "s": "x", "a": [true, null]})
        );
        assert!(exported["n"].is_i64());
    }

    #[test]
    fn test_from_serde_json() {
        let text = r#"{"z": 1, "a": [1.5, "b"], "m": {"k": false}}"#;
        let source: serde_json::Value = serde_json::from_str(text).unwrap();
        let value = Value::from(source);
        assert_eq!(value, parse_str(text).unwrap());
        assert!(value.get("z").is_number());
    }

    #[test]
    fn test_serialize_with_serde_json() {
        let value = parse_str(r#"{"big": 18446744073709551615, "list": [1, "two"]}"#).unwrap();
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#"{"big":18446744073709551615,"list":[1,"two"]}"#);
    }
}
