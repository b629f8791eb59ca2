use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Upstream status code signalling success.
pub const STATUS_OK: i64 = 1;
/// Error text accompanying [`STATUS_OK`].
pub const OK_MESSAGE: &str = "OK";
/// Page size assumed when the upstream omits `limit`.
pub const DEFAULT_LIMIT: u64 = 20;
pub const DEFAULT_OFFSET: u64 = 0;

/// Standard response wrapper carrying status, pagination counters and
/// results.
///
/// `results` is a list for collection operations and a single record for
/// by-ID operations. Field names match the upstream payload verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Envelope<T> {
    pub status_code: i64,
    pub error: String,
    pub number_of_total_results: u64,
    pub number_of_page_results: u64,
    pub limit: u64,
    pub offset: u64,
    pub results: T,
}

impl<T> Envelope<Vec<T>> {
    /// The canonical zero-result envelope.
    ///
    /// Composite lookups answer with this when an intermediate step finds
    /// nothing; "nothing found" is a successful answer.
    pub fn empty(limit: u64, offset: u64) -> Self {
        Self {
            status_code: STATUS_OK,
            error: OK_MESSAGE.to_string(),
            number_of_total_results: 0,
            number_of_page_results: 0,
            limit,
            offset,
            results: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_envelope_is_a_pure_function_of_its_inputs() {
        let first: Envelope<Vec<serde_json::Value>> = Envelope::empty(10, 0);
        let second: Envelope<Vec<serde_json::Value>> = Envelope::empty(10, 0);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            json!({
                "status_code": 1,
                "error": "OK",
                "number_of_total_results": 0,
                "number_of_page_results": 0,
                "limit": 10,
                "offset": 0,
                "results": []
            })
        );
    }
}
