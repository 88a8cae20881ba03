//! Dynamic runtime values with explicit type tags.
//!
//! Attribute values and targeting candidate values arrive from the host SDK
//! without a schema, so they are modeled as a tagged variant produced once at
//! the decode boundary. All type tests during evaluation are tag matches;
//! nothing in the hot path inspects structure reflectively.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// A dynamically-typed value: a user attribute or a targeting candidate.
///
/// `Unknown` covers every JSON shape the engine has no comparison semantics
/// for (objects, null). It never coerces and therefore never matches.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// Signed integer.
    Int(i64),
    /// Double-precision float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Ordered sequence of values (fan-out semantics in the evaluator).
    Sequence(Vec<Value>),
    /// A value the engine cannot compare. Fails every coercion.
    Unknown,
}

impl Value {
    /// Convert a decoded JSON value into a tagged [`Value`].
    ///
    /// Integers that fit `i64` stay integral; other numbers become floats.
    /// Objects and null map to [`Value::Unknown`].
    pub fn from_json(v: &serde_json::Value) -> Value {
        match v {
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Unknown
                }
            }
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.iter().map(Value::from_json).collect())
            }
            _ => Value::Unknown,
        }
    }

    /// Coerce to a string.
    ///
    /// Strings pass through; integers format without decoration; floats
    /// format via `Display`, which emits the shortest decimal representation
    /// that round-trips to the same value (`42.0` formats as `"42"`, never
    /// `"42.000000"` or an exponent form). Booleans and sequences do not
    /// coerce — boolean matching must not alias its string spelling.
    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            _ => None,
        }
    }

    /// Coerce to a number.
    ///
    /// Numeric kinds pass through; strings are parsed as base-10 float
    /// literals. Booleans never coerce (`true` is not `1`).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => s.parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Coerce to a boolean. Only an actual boolean succeeds — `"true"`,
    /// `0` and `1` all fail.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the elements if this value is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// `true` only for actual numeric kinds, not numeric strings.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Value {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Unknown => write!(f, "null"),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Value::from_json(&raw))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Unknown => serializer.serialize_unit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_tags() {
        assert_eq!(Value::from_json(&json!("abc")), Value::String("abc".into()));
        assert_eq!(Value::from_json(&json!(42)), Value::Int(42));
        assert_eq!(Value::from_json(&json!(42.5)), Value::Float(42.5));
        assert_eq!(Value::from_json(&json!(true)), Value::Bool(true));
        assert_eq!(
            Value::from_json(&json!([1, "a"])),
            Value::Sequence(vec![Value::Int(1), Value::String("a".into())])
        );
        assert_eq!(Value::from_json(&json!(null)), Value::Unknown);
        assert_eq!(Value::from_json(&json!({"k": 1})), Value::Unknown);
    }

    #[test]
    fn test_as_string() {
        assert_eq!(Value::from("abc").as_string(), Some("abc".to_string()));
        assert_eq!(Value::from(42).as_string(), Some("42".to_string()));
        assert_eq!(Value::from(42.5).as_string(), Some("42.5".to_string()));
        // Shortest round-trip formatting: no trailing zeros, no exponent
        assert_eq!(Value::from(42.0).as_string(), Some("42".to_string()));
        assert_eq!(Value::from(0.1).as_string(), Some("0.1".to_string()));
        assert_eq!(Value::from(true).as_string(), None);
        assert_eq!(Value::from(vec!["a"]).as_string(), None);
        assert_eq!(Value::Unknown.as_string(), None);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Value::from(42).as_number(), Some(42.0));
        assert_eq!(Value::from(42.5).as_number(), Some(42.5));
        assert_eq!(Value::from("42").as_number(), Some(42.0));
        assert_eq!(Value::from("42.5").as_number(), Some(42.5));
        assert_eq!(Value::from("abc").as_number(), None);
        assert_eq!(Value::from(true).as_number(), None);
        assert_eq!(Value::from(vec![1]).as_number(), None);
    }

    #[test]
    fn test_as_bool_never_aliases() {
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(false).as_bool(), Some(false));
        assert_eq!(Value::from("true").as_bool(), None);
        assert_eq!(Value::from(1).as_bool(), None);
        assert_eq!(Value::from(0).as_bool(), None);
    }

    #[test]
    fn test_as_sequence() {
        let v = Value::from(vec![1, 2, 3]);
        assert_eq!(
            v.as_sequence(),
            Some(&[Value::Int(1), Value::Int(2), Value::Int(3)][..])
        );
        assert_eq!(Value::from("abc").as_sequence(), None);
    }

    #[test]
    fn test_is_numeric() {
        assert!(Value::from(1).is_numeric());
        assert!(Value::from(1.5).is_numeric());
        assert!(!Value::from("1").is_numeric());
        assert!(!Value::from(true).is_numeric());
        assert!(!Value::from(vec![1]).is_numeric());
    }

    #[test]
    fn test_serde_round_trip() {
        let v: Value = serde_json::from_value(json!(["a", 1, 2.5, true])).unwrap();
        assert_eq!(
            v,
            Value::Sequence(vec![
                Value::String("a".into()),
                Value::Int(1),
                Value::Float(2.5),
                Value::Bool(true),
            ])
        );
        let back = serde_json::to_value(&v).unwrap();
        assert_eq!(back, json!(["a", 1, 2.5, true]));
    }
}
