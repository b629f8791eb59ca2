use std::time::Instant;

use async_trait::async_trait;
use comicvine_util::{QueryParams, redact_sensitive, truncate_with_ellipsis};
use reqwest::{Client, Url, header};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{ApiError, ComicVineConfig};

/// `User-Agent` sent with every upstream request.
pub const USER_AGENT: &str = concat!("comicvine-mcp/", env!("CARGO_PKG_VERSION"));

/// Parameters the gateway always sets itself.
const RESERVED_PARAMS: [&str; 2] = ["format", "api_key"];

/// Bytes of a non-JSON body kept in decode errors.
const DECODE_PREVIEW_CHARS: usize = 200;

/// A single read-only call against the upstream catalogue.
#[async_trait]
pub trait ComicVineApi: Send + Sync {
    /// Issues one GET against `path` with the normalized `params` and returns
    /// the parsed JSON body.
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value, ApiError>;
}

#[async_trait]
impl<T: ComicVineApi + ?Sized> ComicVineApi for std::sync::Arc<T> {
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value, ApiError> {
        (**self).get(path, params).await
    }
}

/// `reqwest`-backed gateway.
///
/// Every request carries `format=json` and the configured API key; caller
/// parameters with those names are ignored. One attempt per call, no retry
/// and no timeout beyond what the network stack imposes.
#[derive(Debug, Clone)]
pub struct ComicVineClient {
    config: ComicVineConfig,
    http: Client,
}

impl ComicVineClient {
    pub fn new(config: ComicVineConfig) -> Result<Self, ApiError> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        default_headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));

        let http = Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|error| ApiError::configuration(format!("build http client: {error}")))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ComicVineConfig {
        &self.config
    }

    /// Resolves `path` against the base URL and appends the query string.
    pub fn endpoint_url(&self, path: &str, params: &QueryParams) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.config.base_url(), path);
        let mut url = Url::parse(&raw).map_err(|source| ApiError::InvalidUrl { url: raw.clone(), source })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                if RESERVED_PARAMS.contains(&key.as_str()) {
                    continue;
                }
                pairs.append_pair(key, &value.as_query_string());
            }
            pairs.append_pair("format", "json");
            pairs.append_pair("api_key", self.config.api_key());
        }
        Ok(url)
    }
}

#[async_trait]
impl ComicVineApi for ComicVineClient {
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value, ApiError> {
        let url = self.endpoint_url(path, params)?;
        let redacted_url = redact_sensitive(url.as_str());
        debug!(url = %redacted_url, "sending comic vine request");

        let started = Instant::now();
        let response = self.http.get(url).send().await.map_err(|error| {
            warn!(path, error = %error, "comic vine request failed to send");
            ApiError::Transport(error)
        })?;
        let status = response.status();
        let body = response.text().await?;
        let duration_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            warn!(path, status = status.as_u16(), duration_ms, "comic vine request returned an error status");
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        debug!(path, status = status.as_u16(), duration_ms, "comic vine request completed");

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            preview: truncate_with_ellipsis(&body, DECODE_PREVIEW_CHARS),
            source,
        })
    }
}
