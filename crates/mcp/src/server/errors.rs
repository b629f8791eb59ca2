//! Structured MCP error payloads.

use chrono::Utc;
use comicvine_engine::ComicsError;
use rmcp::model::ErrorData;
use serde_json::{Value, json};

/// Maps a failed tool call to an MCP error.
///
/// Caller mistakes become `invalid_params`; everything else is an
/// `internal_error`. Both carry the same structured `data` payload.
pub fn tool_error(tool: &str, error: &ComicsError) -> ErrorData {
    let message = error.to_string();
    let data = Some(error_data(tool, error, &message));
    if error.is_caller_error() {
        ErrorData::invalid_params(message, data)
    } else {
        ErrorData::internal_error(message, data)
    }
}

fn error_data(tool: &str, error: &ComicsError, message: &str) -> Value {
    let mut payload = json!({
        "error_code": error.error_code(),
        "category": error.category(),
        "message": message,
        "context": context(tool, error),
        "retryable": error.is_retryable(),
        "correlation_id": format!("tool-{}", Utc::now().timestamp_millis()),
    });
    if !error.violations().is_empty() {
        payload["violations"] = error.violations().iter().map(|violation| violation.to_json_value()).collect();
    }
    payload
}

fn context(tool: &str, error: &ComicsError) -> Value {
    let mut context = json!({ "tool": tool });
    match error {
        ComicsError::UpstreamStatus { status_code, .. } => context["upstream_status_code"] = json!(status_code),
        ComicsError::Api(api) => {
            if let Some(status) = api.status() {
                context["http_status"] = json!(status);
            }
        }
        _ => {}
    }
    context
}
