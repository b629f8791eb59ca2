use thiserror::Error;

/// Failures of a single gateway call, or of building the gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unusable API key or base URL. Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The upstream answered with a status outside 200-299.
    #[error("Comic Vine API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// DNS, connect, TLS or body-read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body is not JSON.
    #[error("Comic Vine API returned invalid JSON ({source}); body starts with {preview:?}")]
    Decode {
        preview: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Upstream HTTP status, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Stable category name used in structured error payloads.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Upstream { .. } => "upstream",
            Self::Transport(_) => "transport",
            Self::Decode { .. } => "decode",
            Self::InvalidUrl { .. } => "configuration",
        }
    }

    /// Whether repeating the same call later could succeed. Nothing in the
    /// workspace retries; callers get the hint.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            Self::Transport(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_message_carries_status_and_body() {
        let error = ApiError::Upstream {
            status: 404,
            body: "Not Found".into(),
        };
        assert_eq!(error.to_string(), "Comic Vine API error: 404 - Not Found");
        assert_eq!(error.status(), Some(404));
        assert!(!error.is_retryable());
    }

    #[test]
    fn server_errors_are_retryable() {
        let error = ApiError::Upstream {
            status: 503,
            body: String::new(),
        };
        assert!(error.is_retryable());
        assert_eq!(error.category(), "upstream");
    }
}
