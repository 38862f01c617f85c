use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single option value.
///
/// Deserialization is shape driven: booleans, integers, floats, strings and
/// string arrays map onto their own variants, anything else is kept as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
    Json(Value),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether emitting this value would produce an empty token.
    pub fn is_blank(&self) -> bool {
        match self {
            OptionValue::Text(s) => s.trim().is_empty(),
            OptionValue::List(items) => items.iter().all(|item| item.trim().is_empty()),
            _ => false,
        }
    }

    /// The value as one JSON-text token.
    ///
    /// Strings are taken as already serialized JSON and passed through.
    pub fn to_json_text(&self) -> String {
        match self {
            OptionValue::Text(s) | OptionValue::Json(Value::String(s)) => s.clone(),
            OptionValue::List(items) => Value::from(items.clone()).to_string(),
            OptionValue::Json(v) => v.to_string(),
            other => other.to_string(),
        }
    }
}

/// The string form used as a value token.
///
/// Lists are comma-joined and JSON is rendered compactly; a JSON string is
/// emitted without its quotes.
impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Int(n) => write!(f, "{n}"),
            OptionValue::Float(n) => write!(f, "{n}"),
            OptionValue::Text(s) => f.write_str(s),
            OptionValue::List(items) => f.write_str(&items.join(",")),
            OptionValue::Json(Value::String(s)) => f.write_str(s),
            OptionValue::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(impl From<$t> for OptionValue {
            fn from(value: $t) -> Self {
                OptionValue::Int(i64::from(value))
            }
        })*
    };
}

int_value!(u8, u16, u32, i32, i64);

/// Values beyond `i64::MAX` (e.g. 64-bit seeds) keep their exact decimal text.
impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => OptionValue::Int(n),
            Err(_) => OptionValue::Text(value.to_string()),
        }
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::List(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        OptionValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for OptionValue {
    fn from(value: &[&str]) -> Self {
        OptionValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        OptionValue::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_forms() {
        assert_eq!(OptionValue::from(100u32).to_string(), "100");
        assert_eq!(OptionValue::from(0.5).to_string(), "0.5");
        assert_eq!(OptionValue::from(2.0).to_string(), "2");
        assert_eq!(OptionValue::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(OptionValue::from("1M").to_string(), "1M");
        assert_eq!(OptionValue::from(vec!["saddr", "dport"]).to_string(), "saddr,dport");
        assert_eq!(
            OptionValue::from(json!({"team": "red"})).to_string(),
            r#"{"team":"red"}"#
        );
        assert_eq!(OptionValue::from(json!("raw")).to_string(), "raw");
    }

    #[test]
    fn deserializes_by_shape() {
        let parsed: Vec<OptionValue> =
            serde_json::from_str(r#"[true, 80, 0.25, "eth0", ["a","b"], {"k":1}]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                OptionValue::Bool(true),
                OptionValue::Int(80),
                OptionValue::Float(0.25),
                OptionValue::Text("eth0".into()),
                OptionValue::List(vec!["a".into(), "b".into()]),
                OptionValue::Json(json!({"k": 1})),
            ]
        );
    }

    #[test]
    fn json_text_forms() {
        assert_eq!(
            OptionValue::from(vec!["red", "blue"]).to_json_text(),
            r#"["red","blue"]"#
        );
        assert_eq!(OptionValue::from(json!({"k": [1, 2]})).to_json_text(), r#"{"k":[1,2]}"#);
        assert_eq!(OptionValue::from(r#"{"k":1}"#).to_json_text(), r#"{"k":1}"#);
        assert_eq!(OptionValue::from(7u32).to_json_text(), "7");
    }

    #[test]
    fn blank_detection() {
        assert!(OptionValue::from("  ").is_blank());
        assert!(OptionValue::List(vec![]).is_blank());
        assert!(!OptionValue::from("10.0.0.0/8").is_blank());
        assert!(!OptionValue::Bool(false).is_blank());
    }
}
