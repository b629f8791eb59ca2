//! Response shape normalization.
//!
//! Upstream payloads are validated against the derived JSON schema of the
//! target record before they are decoded, so a mismatch is reported with a
//! JSON path instead of a bare serde message. Missing envelope fields are
//! filled with defaults.

use comicvine_types::{DEFAULT_LIMIT, DEFAULT_OFFSET, Envelope, OK_MESSAGE, RecordShape, STATUS_OK};
use comicvine_util::{Violation, collect_schema_violations};
use serde_json::{Map, Value};

use crate::ComicsError;

/// JSON schema of a record type, as a plain value.
pub fn record_schema<R: RecordShape>() -> Value {
    // A derived schema always serializes; `true` accepts anything.
    serde_json::to_value(schemars::schema_for!(R)).unwrap_or(Value::Bool(true))
}

/// Wraps a collection payload.
///
/// `results` may be an array, a single object (wrapped into a one-element
/// list) or absent. Counters default to the number of records, `limit` to
/// 20 and `offset` to 0.
pub fn wrap_collection<R: RecordShape>(payload: Value) -> Result<Envelope<Vec<R>>, ComicsError> {
    let subject = format!("{} response", R::SHAPE);
    let mut object = into_object(payload, &subject)?;
    let mut violations = Vec::new();
    let header = EnvelopeHeader::read(&object, &mut violations);

    let records = match object.remove("results") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(records)) => records,
        Some(record @ Value::Object(_)) => vec![record],
        Some(_) => {
            violations.push(Violation::new("$.results", "type", "expected array or object"));
            Vec::new()
        }
    };

    let schema = record_schema::<R>();
    for (index, record) in records.iter().enumerate() {
        violations.extend(collect_schema_violations(record, &schema, &format!("$.results[{index}]")));
    }
    if !violations.is_empty() {
        return Err(ComicsError::validation(subject, violations));
    }

    let results = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| decode_record::<R>(record, &format!("$.results[{index}]"), &subject))
        .collect::<Result<Vec<_>, _>>()?;
    let count = results.len() as u64;

    Ok(Envelope {
        status_code: header.status_code.unwrap_or(STATUS_OK),
        error: header.error.unwrap_or_else(|| OK_MESSAGE.to_string()),
        number_of_total_results: header.number_of_total_results.unwrap_or(count),
        number_of_page_results: header.number_of_page_results.unwrap_or(count),
        limit: header.limit.unwrap_or(DEFAULT_LIMIT),
        offset: header.offset.unwrap_or(DEFAULT_OFFSET),
        results,
    })
}

/// Wraps a single-record payload from a detail endpoint.
///
/// Both counters are 1. A payload without a record fails with
/// [`ComicsError::UpstreamStatus`] when the upstream reported a non-OK
/// status, and with a validation error otherwise.
pub fn wrap_single<R: RecordShape>(payload: Value) -> Result<Envelope<R>, ComicsError> {
    let subject = format!("{} response", R::SHAPE);
    let mut object = into_object(payload, &subject)?;
    let mut violations = Vec::new();
    let header = EnvelopeHeader::read(&object, &mut violations);
    if !violations.is_empty() {
        return Err(ComicsError::validation(subject, violations));
    }
    let status_code = header.status_code.unwrap_or(STATUS_OK);

    let record = match object.remove("results") {
        Some(record @ Value::Object(_)) => record,
        Some(Value::Array(mut records)) if records.len() == 1 => records.remove(0),
        _ if status_code != STATUS_OK => {
            return Err(ComicsError::UpstreamStatus {
                status_code,
                error: header.error.unwrap_or_default(),
            });
        }
        _ => {
            return Err(ComicsError::validation(
                subject,
                vec![Violation::new("$.results", "type", "expected a single record")],
            ));
        }
    };

    let violations = collect_schema_violations(&record, &record_schema::<R>(), "$.results");
    if !violations.is_empty() {
        return Err(ComicsError::validation(subject, violations));
    }
    let results = decode_record::<R>(record, "$.results", &subject)?;

    Ok(Envelope {
        status_code,
        error: header.error.unwrap_or_else(|| OK_MESSAGE.to_string()),
        number_of_total_results: 1,
        number_of_page_results: 1,
        limit: header.limit.unwrap_or(DEFAULT_LIMIT),
        offset: header.offset.unwrap_or(DEFAULT_OFFSET),
        results,
    })
}

/// Zero-result envelope for a page request, with the usual defaults.
pub fn empty_page<R>(limit: Option<u32>, offset: Option<u32>) -> Envelope<Vec<R>> {
    Envelope::empty(
        limit.map(u64::from).unwrap_or(DEFAULT_LIMIT),
        offset.map(u64::from).unwrap_or(DEFAULT_OFFSET),
    )
}

fn into_object(payload: Value, subject: &str) -> Result<Map<String, Value>, ComicsError> {
    match payload {
        Value::Object(object) => Ok(object),
        _ => Err(ComicsError::validation(
            subject,
            vec![Violation::new("$", "type", "expected a JSON object envelope")],
        )),
    }
}

fn decode_record<R: RecordShape>(record: Value, path: &str, subject: &str) -> Result<R, ComicsError> {
    let mut decoded: R = serde_json::from_value(record)
        .map_err(|error| ComicsError::validation(subject, vec![Violation::new(path, "type", error.to_string())]))?;
    decoded.fill_defaults();
    Ok(decoded)
}

#[derive(Debug, Default)]
struct EnvelopeHeader {
    status_code: Option<i64>,
    error: Option<String>,
    number_of_total_results: Option<u64>,
    number_of_page_results: Option<u64>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl EnvelopeHeader {
    /// Reads the counters, treating `null` as absent and recording a
    /// violation for any other non-conforming value.
    fn read(object: &Map<String, Value>, violations: &mut Vec<Violation>) -> Self {
        Self {
            status_code: read_field(object, "status_code", "integer", Value::as_i64, violations),
            error: read_field(object, "error", "string", |value| value.as_str().map(str::to_string), violations),
            number_of_total_results: read_count(object, "number_of_total_results", violations),
            number_of_page_results: read_count(object, "number_of_page_results", violations),
            limit: read_count(object, "limit", violations),
            offset: read_count(object, "offset", violations),
        }
    }
}

fn read_count(object: &Map<String, Value>, key: &str, violations: &mut Vec<Violation>) -> Option<u64> {
    read_field(object, key, "non-negative integer", Value::as_u64, violations)
}

fn read_field<T>(
    object: &Map<String, Value>,
    key: &str,
    expected: &str,
    convert: impl Fn(&Value) -> Option<T>,
    violations: &mut Vec<Violation>,
) -> Option<T> {
    let value = object.get(key).filter(|value| !value.is_null())?;
    let converted = convert(value);
    if converted.is_none() {
        violations.push(Violation::new(format!("$.{key}"), "type", format!("expected {expected}, found {value}")));
    }
    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use comicvine_types::{Character, Movie, SearchResult};
    use serde_json::json;

    #[test]
    fn fills_missing_envelope_fields_from_results() {
        let envelope: Envelope<Vec<Character>> =
            wrap_collection(json!({ "results": [{ "id": 1, "name": "Superman" }, { "id": 2 }] })).unwrap();
        assert_eq!(envelope.status_code, 1);
        assert_eq!(envelope.error, "OK");
        assert_eq!(envelope.number_of_total_results, 2);
        assert_eq!(envelope.number_of_page_results, 2);
        assert_eq!(envelope.limit, 20);
        assert_eq!(envelope.offset, 0);
        assert_eq!(envelope.results[1].name.as_deref(), Some("Unknown Character"));
    }

    #[test]
    fn keeps_upstream_counters() {
        let envelope: Envelope<Vec<Character>> = wrap_collection(json!({
            "status_code": 1,
            "error": "OK",
            "number_of_total_results": 1200,
            "number_of_page_results": 1,
            "limit": 1,
            "offset": 40,
            "results": [{ "id": 1 }]
        }))
        .unwrap();
        assert_eq!(envelope.number_of_total_results, 1200);
        assert_eq!(envelope.limit, 1);
        assert_eq!(envelope.offset, 40);
    }

    #[test]
    fn single_object_results_become_a_list() {
        let envelope: Envelope<Vec<Movie>> = wrap_collection(json!({ "results": { "id": 9, "name": "Man of Steel" } })).unwrap();
        assert_eq!(envelope.results.len(), 1);
        assert_eq!(envelope.number_of_total_results, 1);
    }

    #[test]
    fn search_result_null_name_is_normalized_to_empty_string() {
        let envelope: Envelope<Vec<SearchResult>> = wrap_collection(json!({ "results": [{ "name": null, "id": 1 }] })).unwrap();
        assert_eq!(envelope.results[0].name, "");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["results"][0]["name"], json!(""));
    }

    #[test]
    fn missing_id_is_a_validation_failure() {
        let error = wrap_collection::<Character>(json!({ "results": [{ "id": 1 }, { "name": "Nobody" }] })).unwrap_err();
        match error {
            ComicsError::SchemaValidation { subject, violations } => {
                assert_eq!(subject, "character response");
                assert_eq!(violations[0].path, "$.results[1].id");
                assert_eq!(violations[0].rule, "required");
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_nested_type_reports_its_path() {
        let error =
            wrap_collection::<Character>(json!({ "results": [{ "id": 1, "movies": [{ "name": 42 }] }] })).unwrap_err();
        let violations = error.violations();
        assert!(violations.iter().any(|violation| violation.path == "$.results[0].movies[0].name"));
    }

    #[test]
    fn malformed_counters_are_violations() {
        let error = wrap_collection::<Character>(json!({ "limit": "ten", "results": [] })).unwrap_err();
        assert_eq!(error.violations()[0].path, "$.limit");
    }

    #[test]
    fn wrapped_envelopes_revalidate_without_change() {
        let first: Envelope<Vec<Character>> = wrap_collection(json!({
            "number_of_total_results": 3,
            "results": [{
                "id": 1443,
                "name": null,
                "publisher": { "id": 10, "name": "DC Comics", "api_detail_url": "https://example.com/p" },
                "movies": [{ "id": 1, "name": null }],
                "image": { "super_url": "https://example.com/s.jpg" },
                "gender": 1
            }]
        }))
        .unwrap();
        let serialized = serde_json::to_value(&first).unwrap();
        let second: Envelope<Vec<Character>> = wrap_collection(serialized.clone()).unwrap();
        assert_eq!(first, second);
        assert_eq!(serde_json::to_value(&second).unwrap(), serialized);
    }

    #[test]
    fn single_record_forces_counters_to_one() {
        let envelope: Envelope<Character> = wrap_single(json!({
            "status_code": 1,
            "number_of_total_results": 1,
            "number_of_page_results": 1,
            "limit": 1,
            "results": { "id": 1443, "name": "Superman" }
        }))
        .unwrap();
        assert_eq!(envelope.results.id, 1443);
        assert_eq!(envelope.number_of_page_results, 1);
        assert_eq!(envelope.number_of_total_results, 1);
    }

    #[test]
    fn single_record_with_failed_status_is_an_upstream_status_error() {
        let error = wrap_single::<Character>(json!({
            "status_code": 101,
            "error": "Object Not Found",
            "results": []
        }))
        .unwrap_err();
        assert!(matches!(
            error,
            ComicsError::UpstreamStatus { status_code: 101, ref error } if error == "Object Not Found"
        ));
    }

    #[test]
    fn empty_page_uses_defaults() {
        let envelope: Envelope<Vec<Character>> = empty_page(None, Some(40));
        assert_eq!(envelope.limit, 20);
        assert_eq!(envelope.offset, 40);
        assert!(envelope.results.is_empty());
    }
}
