use ordered_float::OrderedFloat;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// A single query parameter value: a scalar, an array or a nested object.
///
/// Objects are stored in a `BTreeMap` so that keys are always serialized
/// in sorted order. Two values that compare equal always produce the same
/// JSON text, which is what makes cache keys stable. The converse holds as
/// well: NaN and infinities have no JSON form and fail to serialize instead
/// of collapsing into `null`.
///
/// # Example
///
/// ```
/// use attache_core::QueryValue;
///
/// let val: QueryValue = "attachment".into();
/// assert_eq!(val.as_str(), Some("attachment"));
///
/// let ids: QueryValue = vec![5, 9, 12].into();
/// assert!(matches!(ids, QueryValue::Array(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (signed 64-bit)
    Integer(i64),
    /// Integer above `i64::MAX`
    Unsigned(u64),
    /// Floating point value (wrapped in OrderedFloat for Eq support)
    Float(OrderedFloat<f64>),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<QueryValue>),
    /// Object of values, sorted by key
    Object(BTreeMap<String, QueryValue>),
}

impl QueryValue {
    /// Returns true if the value is Null.
    pub fn is_null(&self) -> bool {
        matches!(self, QueryValue::Null)
    }

    /// Returns the value as a bool if it matches.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            QueryValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an i64 if it matches.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            QueryValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a u64 if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            QueryValue::Integer(i) => u64::try_from(*i).ok(),
            QueryValue::Unsigned(u) => Some(*u),
            _ => None,
        }
    }

    /// Returns the value as a str if it matches.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an array slice if it matches.
    pub fn as_array(&self) -> Option<&[QueryValue]> {
        match self {
            QueryValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns the value as an object if it matches.
    pub fn as_object(&self) -> Option<&BTreeMap<String, QueryValue>> {
        match self {
            QueryValue::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl Serialize for QueryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryValue::Null => serializer.serialize_unit(),
            QueryValue::Bool(b) => serializer.serialize_bool(*b),
            QueryValue::Integer(i) => serializer.serialize_i64(*i),
            QueryValue::Unsigned(u) => serializer.serialize_u64(*u),
            QueryValue::Float(f) if f.0.is_finite() => serializer.serialize_f64(f.0),
            QueryValue::Float(f) => Err(S::Error::custom(format!(
                "non-finite float {} has no JSON representation",
                f.0
            ))),
            QueryValue::String(s) => serializer.serialize_str(s),
            QueryValue::Array(arr) => serializer.collect_seq(arr),
            QueryValue::Object(map) => serializer.collect_map(map),
        }
    }
}

// ==========================================
// From Conversions for Ergonomics
// ==========================================

impl From<bool> for QueryValue {
    fn from(v: bool) -> Self {
        QueryValue::Bool(v)
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        QueryValue::Integer(v)
    }
}

impl From<i32> for QueryValue {
    fn from(v: i32) -> Self {
        QueryValue::Integer(v as i64)
    }
}

impl From<u32> for QueryValue {
    fn from(v: u32) -> Self {
        QueryValue::Integer(v as i64)
    }
}

impl From<u64> for QueryValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => QueryValue::Integer(i),
            Err(_) => QueryValue::Unsigned(v),
        }
    }
}

impl From<f64> for QueryValue {
    fn from(v: f64) -> Self {
        QueryValue::Float(OrderedFloat(v))
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::String(v)
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::String(v.to_string())
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(v: Vec<T>) -> Self {
        QueryValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, QueryValue>> for QueryValue {
    fn from(v: BTreeMap<String, QueryValue>) -> Self {
        QueryValue::Object(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_creation() {
        let v: QueryValue = 42.into();
        assert_eq!(v, QueryValue::Integer(42));
        assert_eq!(v.as_i64(), Some(42));

        let s: QueryValue = "inherit".into();
        assert_eq!(s.as_str(), Some("inherit"));
        assert!(QueryValue::Null.is_null());
    }

    #[test]
    fn test_object_serializes_sorted() {
        let mut map = BTreeMap::new();
        map.insert("zeta".to_string(), QueryValue::from(1));
        map.insert("alpha".to_string(), QueryValue::from(2));

        let json = serde_json::to_string(&QueryValue::Object(map)).unwrap();
        assert_eq!(json, r#"{"alpha":2,"zeta":1}"#);
    }

    #[test]
    fn test_serde_deserialization() {
        let json = r#"{"order": "DESC", "posts_per_page": 40, "ratio": 0.5, "mime": ["image", "video"]}"#;
        let v: QueryValue = serde_json::from_str(json).unwrap();

        let map = v.as_object().expect("Expected Object");
        assert_eq!(map.get("order").unwrap().as_str(), Some("DESC"));
        assert_eq!(map.get("posts_per_page").unwrap().as_i64(), Some(40));
        assert_eq!(map.get("ratio").unwrap(), &QueryValue::from(0.5));
        assert_eq!(map.get("mime").unwrap().as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_large_unsigned_keeps_exact_value() {
        let max: QueryValue = serde_json::from_str("18446744073709551615").unwrap();
        let below: QueryValue = serde_json::from_str("18446744073709551614").unwrap();

        assert_eq!(max, QueryValue::Unsigned(u64::MAX));
        assert_ne!(max, below);
        assert_eq!(serde_json::to_string(&max).unwrap(), "18446744073709551615");
        assert_eq!(serde_json::to_string(&below).unwrap(), "18446744073709551614");
    }

    #[test]
    fn test_small_unsigned_stays_integer() {
        assert_eq!(QueryValue::from(40u64), QueryValue::Integer(40));
        assert_eq!(QueryValue::from(u64::MAX).as_u64(), Some(u64::MAX));

        let v: QueryValue = serde_json::from_str("40").unwrap();
        assert_eq!(v, QueryValue::Integer(40));
    }

    #[test]
    fn test_non_finite_floats_do_not_serialize() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = serde_json::to_string(&QueryValue::from(value));
            assert!(result.is_err(), "{} should not serialize", value);
        }

        let nested = QueryValue::from(vec![QueryValue::from(1.5), QueryValue::from(f64::NAN)]);
        assert!(serde_json::to_string(&nested).is_err());
        assert_eq!(serde_json::to_string(&QueryValue::from(1.5)).unwrap(), "1.5");
    }
}
