//! JSON-schema shape validation with structured violations.
//!
//! Covers the keyword subset used by derived record schemas and by tool input
//! shapes: `type`, `required`, `properties`, `items`, `minimum`, `maximum`,
//! `enum`, `anyOf`/`oneOf`, boolean schemas and local `$ref`s into
//! `$defs`/`definitions`. Every violation is collected; validation does not
//! stop at the first one.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// A structured shape violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON path where the violation occurred, e.g. `$.results[0].id`.
    pub path: String,
    /// Stable rule identifier (`required`, `type`, `minimum`, ...).
    pub rule: String,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Converts this violation into a JSON object for transport layers.
    pub fn to_json_value(&self) -> Value {
        serde_json::json!({
            "path": self.path,
            "rule": self.rule,
            "message": self.message,
        })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Joins violations into a single `; `-separated line.
pub fn summarize_violations(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Collects every violation of `value` against `schema`, reporting paths
/// relative to `base_path` (usually `$`).
pub fn collect_schema_violations(value: &Value, schema: &Value, base_path: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    SchemaWalker { root: schema }.check(value, schema, base_path, &mut violations);
    violations
}

/// Returns `Ok(())` when `value` conforms to `schema`, otherwise all
/// violations.
pub fn validate_against_schema(value: &Value, schema: &Value) -> Result<(), Vec<Violation>> {
    let violations = collect_schema_violations(value, schema, "$");
    if violations.is_empty() {
        return Ok(());
    }
    Err(violations)
}

struct SchemaWalker<'a> {
    root: &'a Value,
}

impl<'a> SchemaWalker<'a> {
    fn check(&self, value: &Value, schema: &'a Value, path: &str, violations: &mut Vec<Violation>) {
        let keywords = match schema {
            Value::Bool(true) => return,
            Value::Bool(false) => {
                violations.push(Violation::new(path, "not", "no value is allowed here"));
                return;
            }
            Value::Object(keywords) => keywords,
            _ => return,
        };

        if let Some(reference) = keywords.get("$ref").and_then(Value::as_str) {
            match self.resolve(reference) {
                Some(target) => self.check(value, target, path, violations),
                None => violations.push(Violation::new(
                    path,
                    "ref",
                    format!("unresolvable schema reference '{reference}'"),
                )),
            }
        }

        for keyword in ["anyOf", "oneOf"] {
            if let Some(branches) = keywords.get(keyword).and_then(Value::as_array) {
                let matched = branches.iter().any(|branch| {
                    let mut scratch = Vec::new();
                    self.check(value, branch, path, &mut scratch);
                    scratch.is_empty()
                });
                if !matched {
                    violations.push(Violation::new(
                        path,
                        "any_of",
                        format!("{} matches none of the allowed shapes", describe(value)),
                    ));
                }
            }
        }

        if let Some(expected) = keywords.get("type")
            && !type_matches(value, expected)
        {
            violations.push(Violation::new(
                path,
                "type",
                format!("expected {}, found {}", expected_types(expected), describe(value)),
            ));
            return;
        }

        if let Some(allowed) = keywords.get("enum").and_then(Value::as_array)
            && !allowed.contains(value)
        {
            violations.push(Violation::new(path, "enum", format!("{value} is not one of the allowed values")));
        }

        if let Some(number) = value.as_f64() {
            check_bound(keywords.get("minimum"), number, path, violations, Bound::Minimum);
            check_bound(keywords.get("maximum"), number, path, violations, Bound::Maximum);
        }

        match value {
            Value::Object(object) => {
                if let Some(required) = keywords.get("required").and_then(Value::as_array) {
                    for field in required.iter().filter_map(Value::as_str) {
                        if !object.contains_key(field) {
                            violations.push(Violation::new(
                                format!("{path}.{field}"),
                                "required",
                                format!("missing required field `{field}`"),
                            ));
                        }
                    }
                }
                if let Some(properties) = keywords.get("properties").and_then(Value::as_object) {
                    for (field, field_schema) in properties {
                        if let Some(field_value) = object.get(field) {
                            self.check(field_value, field_schema, &format!("{path}.{field}"), violations);
                        }
                    }
                }
            }
            Value::Array(items) => {
                if let Some(item_schema) = keywords.get("items") {
                    for (index, item) in items.iter().enumerate() {
                        self.check(item, item_schema, &format!("{path}[{index}]"), violations);
                    }
                }
            }
            _ => {}
        }
    }

    fn resolve(&self, reference: &str) -> Option<&'a Value> {
        let pointer = reference.strip_prefix('#')?;
        if pointer.is_empty() {
            return Some(self.root);
        }
        self.root.pointer(pointer)
    }
}

#[derive(Clone, Copy)]
enum Bound {
    Minimum,
    Maximum,
}

fn check_bound(limit: Option<&Value>, number: f64, path: &str, violations: &mut Vec<Violation>, bound: Bound) {
    let Some(limit) = limit.and_then(Value::as_f64) else {
        return;
    };
    match bound {
        Bound::Minimum if number < limit => violations.push(Violation::new(
            path,
            "minimum",
            format!("{number} is less than the minimum of {limit}"),
        )),
        Bound::Maximum if number > limit => violations.push(Violation::new(
            path,
            "maximum",
            format!("{number} is greater than the maximum of {limit}"),
        )),
        _ => {}
    }
}

fn type_matches(value: &Value, expected: &Value) -> bool {
    match expected {
        Value::String(name) => matches_type_name(value, name),
        Value::Array(names) => names.iter().filter_map(Value::as_str).any(|name| matches_type_name(value, name)),
        _ => true,
    }
}

fn matches_type_name(value: &Value, name: &str) -> bool {
    match name {
        "null" => value.is_null(),
        "boolean" => value.is_boolean(),
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        _ => true,
    }
}

fn expected_types(expected: &Value) -> String {
    match expected {
        Value::String(name) => name.clone(),
        Value::Array(names) => names.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(" or "),
        other => other.to_string(),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_schema() -> Value {
        json!({
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": ["string", "null"] },
                "publisher": { "anyOf": [{ "$ref": "#/$defs/Stub" }, { "type": "null" }] },
                "movies": { "type": ["array", "null"], "items": { "$ref": "#/$defs/Stub" } }
            },
            "$defs": {
                "Stub": {
                    "type": "object",
                    "properties": { "name": { "type": ["string", "null"] } }
                }
            }
        })
    }

    #[test]
    fn accepts_conforming_record() {
        let record = json!({ "id": 1, "name": null, "publisher": { "name": "DC" }, "movies": [{ "name": "Man of Steel" }] });
        assert!(validate_against_schema(&record, &record_schema()).is_ok());
    }

    #[test]
    fn reports_missing_required_id() {
        let violations = validate_against_schema(&json!({ "name": "Batman" }), &record_schema()).unwrap_err();
        assert_eq!(violations, vec![Violation::new("$.id", "required", "missing required field `id`")]);
    }

    #[test]
    fn reports_nested_type_mismatch_with_path() {
        let record = json!({ "id": 1, "movies": [{ "name": 7 }] });
        let violations = collect_schema_violations(&record, &record_schema(), "$.results[0]");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "$.results[0].movies[0].name");
        assert_eq!(violations[0].rule, "type");
    }

    #[test]
    fn reports_any_of_mismatch() {
        let record = json!({ "id": 1, "publisher": "DC" });
        let violations = validate_against_schema(&record, &record_schema()).unwrap_err();
        assert!(violations.iter().any(|violation| violation.rule == "any_of" && violation.path == "$.publisher"));
    }

    #[test]
    fn enforces_numeric_bounds() {
        let schema = json!({
            "type": "object",
            "properties": { "limit": { "type": "integer", "minimum": 1, "maximum": 100 } }
        });
        let violations = validate_against_schema(&json!({ "limit": 0 }), &schema).unwrap_err();
        assert_eq!(violations[0].rule, "minimum");
        let violations = validate_against_schema(&json!({ "limit": 101 }), &schema).unwrap_err();
        assert_eq!(violations[0].rule, "maximum");
        assert!(validate_against_schema(&json!({ "limit": 100 }), &schema).is_ok());
    }

    #[test]
    fn floats_are_not_integers() {
        let schema = json!({ "type": "integer" });
        let violations = validate_against_schema(&json!(1.5), &schema).unwrap_err();
        assert_eq!(violations[0].message, "expected integer, found number");
    }

    #[test]
    fn summary_lists_every_violation() {
        let violations = vec![
            Violation::new("$.a", "required", "missing required field `a`"),
            Violation::new("$.b", "type", "expected string, found integer"),
        ];
        assert_eq!(
            summarize_violations(&violations),
            "$.a: missing required field `a`; $.b: expected string, found integer"
        );
    }
}
