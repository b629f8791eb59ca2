//! # Query Parameter Normalization
//!
//! Turns the loose option bags produced by tool arguments into the flat
//! string/number map that ends up in an upstream query string.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Number, Value};

/// A single query string value. Numbers keep their JSON representation.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Number(Number),
}

impl QueryValue {
    pub fn as_query_string(&self) -> String {
        match self {
            QueryValue::Text(text) => text.clone(),
            QueryValue::Number(number) => number.to_string(),
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(text) => f.write_str(text),
            QueryValue::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Number(Number::from(value))
    }
}

/// Normalized parameters, keyed by name. Ordering only keeps URLs stable.
pub type QueryParams = BTreeMap<String, QueryValue>;

/// Normalizes a loosely-typed option bag into query parameters.
///
/// - `null` values are dropped (an absent option).
/// - Booleans become `"true"` / `"false"`.
/// - Numbers and strings pass through unchanged.
/// - Arrays and objects are rendered as compact JSON.
///
/// Total and pure: it never fails.
///
/// # Example
/// ```rust
/// use comicvine_util::query::{QueryValue, normalize_query_params};
/// use serde_json::json;
///
/// let options = json!({ "a": null, "b": true, "c": 5, "d": "x" });
/// let params = normalize_query_params(options.as_object().unwrap());
/// assert_eq!(params.len(), 3);
/// assert_eq!(params["b"], QueryValue::Text("true".into()));
/// assert_eq!(params["c"].as_query_string(), "5");
/// ```
pub fn normalize_query_params(options: &Map<String, Value>) -> QueryParams {
    options
        .iter()
        .filter_map(|(key, value)| query_value(value).map(|value| (key.clone(), value)))
        .collect()
}

fn query_value(value: &Value) -> Option<QueryValue> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(QueryValue::Text(flag.to_string())),
        Value::Number(number) => Some(QueryValue::Number(number.clone())),
        Value::String(text) => Some(QueryValue::Text(text.clone())),
        other => Some(QueryValue::Text(other.to_string())),
    }
}

/// Renders parameters as `key=value` pairs, for logs and tests.
pub fn query_pairs(params: &QueryParams) -> Vec<(String, String)> {
    params.iter().map(|(key, value)| (key.clone(), value.as_query_string())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> QueryParams {
        match value {
            Value::Object(map) => normalize_query_params(&map),
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn drops_absent_values_and_stringifies_booleans() {
        let params = normalize(json!({ "a": null, "b": true, "c": 5, "d": "x" }));
        let mut expected = QueryParams::new();
        expected.insert("b".into(), QueryValue::Text("true".into()));
        expected.insert("c".into(), QueryValue::Number(Number::from(5)));
        expected.insert("d".into(), QueryValue::Text("x".into()));
        assert_eq!(params, expected);
    }

    #[test]
    fn false_is_kept_as_text() {
        let params = normalize(json!({ "exact": false }));
        assert_eq!(params["exact"].as_query_string(), "false");
    }

    #[test]
    fn structured_values_render_as_json() {
        let params = normalize(json!({ "ids": [1, 2] }));
        assert_eq!(params["ids"].as_query_string(), "[1,2]");
    }

    #[test]
    fn floats_keep_their_representation() {
        let params = normalize(json!({ "ratio": 1.5 }));
        assert_eq!(query_pairs(&params), vec![("ratio".to_string(), "1.5".to_string())]);
    }
}
