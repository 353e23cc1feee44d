//! Query request type.

use std::collections::BTreeMap;

use crate::error::{AttacheError, Result};
use crate::query::value::QueryValue;

/// A read-only query as seen by the cache adapter.
///
/// A request is an opaque set of named parameters plus two flags that live
/// outside the parameter map and never take part in the cache key:
///
/// - `cacheable`: set by the pre-query step for requests routed through the
///   adapter.
/// - `intercepted`: set by the adapter on the copy of the request it hands to
///   the executor, so that a nested pre-result hook for the same request
///   passes through instead of recursing.
///
/// Parameters are kept in a `BTreeMap`, so insertion order never affects
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryRequest {
    params: BTreeMap<String, QueryValue>,
    cacheable: bool,
    intercepted: bool,
}

impl QueryRequest {
    /// Creates an empty, non-cacheable request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request from an existing parameter map.
    pub fn from_params(params: BTreeMap<String, QueryValue>) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Parses a request from a JSON object of parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use attache_core::QueryRequest;
    ///
    /// let request = QueryRequest::from_json(r#"{"post_type": "attachment", "paged": 2}"#).unwrap();
    /// assert_eq!(request.get("paged").and_then(|v| v.as_i64()), Some(2));
    ///
    /// assert!(QueryRequest::from_json("[1, 2]").is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let value: QueryValue = serde_json::from_str(json)
            .map_err(|e| AttacheError::invalid_request(format!("malformed JSON: {}", e)))?;

        match value {
            QueryValue::Object(params) => Ok(Self::from_params(params)),
            _ => Err(AttacheError::invalid_request(
                "query parameters must be a JSON object",
            )),
        }
    }

    /// Returns the request with the given parameter set.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a parameter, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Returns a parameter value.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    /// Removes a parameter, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.params.remove(key)
    }

    /// Returns all parameters in key order.
    pub fn params(&self) -> &BTreeMap<String, QueryValue> {
        &self.params
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if the request has no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns true if the request was flagged for result caching.
    pub fn is_cacheable(&self) -> bool {
        self.cacheable
    }

    /// Flags or unflags the request for result caching.
    pub fn set_cacheable(&mut self, cacheable: bool) {
        self.cacheable = cacheable;
    }

    /// Returns true if the cache adapter is already handling this request.
    pub fn is_intercepted(&self) -> bool {
        self.intercepted
    }

    /// Returns a copy of this request marked as already handled.
    pub fn intercepted(&self) -> Self {
        Self {
            intercepted: true,
            ..self.clone()
        }
    }

    /// Serializes the parameters as compact JSON with sorted keys.
    ///
    /// Flags are not included. Equal parameter sets always produce the same
    /// string, regardless of the order they were inserted in.
    ///
    /// # Errors
    ///
    /// Returns `AttacheError::Serialization` if a parameter holds a NaN or
    /// infinite float.
    pub fn canonical_json(&self) -> Result<String> {
        serde_json::to_string(&self.params)
            .map_err(|e| AttacheError::serialization("query parameters", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_not_flagged() {
        let request = QueryRequest::new();
        assert!(request.is_empty());
        assert!(!request.is_cacheable());
        assert!(!request.is_intercepted());
    }

    #[test]
    fn test_set_replaces_value() {
        let mut request = QueryRequest::new().with_param("fields", "all");
        request.set("fields", "ids");

        assert_eq!(request.len(), 1);
        assert_eq!(request.get("fields").and_then(|v| v.as_str()), Some("ids"));
    }

    #[test]
    fn test_canonical_json_ignores_insertion_order() {
        let a = QueryRequest::new()
            .with_param("post_type", "attachment")
            .with_param("post_status", "inherit");
        let b = QueryRequest::new()
            .with_param("post_status", "inherit")
            .with_param("post_type", "attachment");

        assert_eq!(a.canonical_json().unwrap(), b.canonical_json().unwrap());
        assert_eq!(
            a.canonical_json().unwrap(),
            r#"{"post_status":"inherit","post_type":"attachment"}"#
        );
    }

    #[test]
    fn test_canonical_json_excludes_flags() {
        let plain = QueryRequest::new().with_param("paged", 1);
        let mut flagged = plain.intercepted();
        flagged.set_cacheable(true);

        assert_eq!(
            plain.canonical_json().unwrap(),
            flagged.canonical_json().unwrap()
        );
    }

    #[test]
    fn test_canonical_json_rejects_non_finite_floats() {
        let nan = QueryRequest::new().with_param("ratio", f64::NAN);
        let inf = QueryRequest::new().with_param("ratio", f64::INFINITY);
        let null = QueryRequest::new().with_param("ratio", QueryValue::Null);

        assert!(nan.canonical_json().unwrap_err().is_serialization_error());
        assert!(inf.canonical_json().unwrap_err().is_serialization_error());
        assert_eq!(null.canonical_json().unwrap(), r#"{"ratio":null}"#);
    }

    #[test]
    fn test_large_ids_stay_distinct() {
        let max = QueryRequest::from_json(r#"{"post_parent": 18446744073709551615}"#).unwrap();
        let below = QueryRequest::from_json(r#"{"post_parent": 18446744073709551614}"#).unwrap();

        assert_ne!(max, below);
        assert_eq!(
            max.canonical_json().unwrap(),
            r#"{"post_parent":18446744073709551615}"#
        );
        assert_ne!(max.canonical_json().unwrap(), below.canonical_json().unwrap());
    }

    #[test]
    fn test_intercepted_copy_leaves_original_untouched() {
        let original = QueryRequest::new().with_param("paged", 1);
        let scoped = original.intercepted();

        assert!(scoped.is_intercepted());
        assert!(!original.is_intercepted());
        assert_eq!(scoped.params(), original.params());
    }

    #[test]
    fn test_from_json_rejects_scalars() {
        let error = QueryRequest::from_json("42").unwrap_err();
        assert!(error.is_invalid_request());

        let error = QueryRequest::from_json("{not json").unwrap_err();
        assert!(error.to_string().contains("malformed JSON"));
    }
}
