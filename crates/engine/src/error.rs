use comicvine_api::ApiError;
use comicvine_util::{Violation, summarize_violations};
use thiserror::Error;

/// Failures of a tool operation.
#[derive(Debug, Error)]
pub enum ComicsError {
    /// Caller input or an upstream payload does not fit the expected shape.
    #[error("{subject} failed validation: {}", summarize_violations(.violations))]
    SchemaValidation { subject: String, violations: Vec<Violation> },

    /// The requested tool is not registered. No upstream call is made.
    #[error("Unknown tool: {name}")]
    UnknownOperation { name: String },

    /// The upstream answered 2xx but reported a failure in the envelope.
    #[error("Comic Vine reported status {status_code}: {error}")]
    UpstreamStatus { status_code: i64, error: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ComicsError {
    pub fn validation(subject: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self::SchemaValidation {
            subject: subject.into(),
            violations,
        }
    }

    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }

    /// Stable machine-readable code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SchemaValidation { .. } => "SCHEMA_VALIDATION_FAILED",
            Self::UnknownOperation { .. } => "UNKNOWN_TOOL",
            Self::UpstreamStatus { .. } => "UPSTREAM_STATUS",
            Self::Api(ApiError::Upstream { .. }) => "UPSTREAM_HTTP_ERROR",
            Self::Api(ApiError::Transport(_)) => "UPSTREAM_TRANSPORT_ERROR",
            Self::Api(ApiError::Decode { .. }) => "UPSTREAM_DECODE_ERROR",
            Self::Api(ApiError::Configuration(_) | ApiError::InvalidUrl { .. }) => "CONFIGURATION_ERROR",
            Self::Encode(_) => "ENCODE_ERROR",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::SchemaValidation { .. } => "validation",
            Self::UnknownOperation { .. } => "unknown_operation",
            Self::UpstreamStatus { .. } => "upstream",
            Self::Api(error) => error.category(),
            Self::Encode(_) => "internal",
        }
    }

    /// True when the caller sent something wrong rather than the system
    /// failing.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::SchemaValidation { .. } | Self::UnknownOperation { .. })
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(error) => error.is_retryable(),
            _ => false,
        }
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::SchemaValidation { violations, .. } => violations,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_failing_fields() {
        let error = ComicsError::validation(
            "get_characters arguments",
            vec![Violation::new("$.limit", "maximum", "101 is greater than the maximum of 100")],
        );
        assert_eq!(
            error.to_string(),
            "get_characters arguments failed validation: $.limit: 101 is greater than the maximum of 100"
        );
        assert!(error.is_caller_error());
        assert_eq!(error.violations().len(), 1);
    }

    #[test]
    fn api_errors_keep_their_category() {
        let error = ComicsError::from(ApiError::Upstream {
            status: 502,
            body: "Bad Gateway".into(),
        });
        assert_eq!(error.category(), "upstream");
        assert_eq!(error.error_code(), "UPSTREAM_HTTP_ERROR");
        assert!(error.is_retryable());
        assert_eq!(error.to_string(), "Comic Vine API error: 502 - Bad Gateway");
    }
}
