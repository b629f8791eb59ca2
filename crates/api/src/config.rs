use std::env;
use std::fmt;
use std::net::IpAddr;

use reqwest::Url;

use crate::ApiError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "COMIC_VINE_API_KEY";
/// Environment variable holding the API base URL.
pub const API_BASE_ENV: &str = "COMIC_VINE_API_BASE";

/// Process-wide gateway configuration.
///
/// Built once at startup and handed to [`crate::ComicVineClient`]; nothing
/// reads the environment after that.
#[derive(Clone, PartialEq, Eq)]
pub struct ComicVineConfig {
    api_key: String,
    base_url: String,
}

impl ComicVineConfig {
    /// Validates and stores an explicit key and base URL.
    ///
    /// Rules for the base URL:
    /// - must parse as an absolute `http`/`https` URL with a host
    /// - loopback hosts may use either scheme, other hosts must
    ///   use `https`
    /// - a trailing `/` is trimmed so that endpoint paths join cleanly
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, ApiError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ApiError::configuration(format!("{API_KEY_ENV} must not be blank")));
        }
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        validate_base_url(&base_url)?;
        Ok(Self { api_key, base_url })
    }

    /// Reads [`API_KEY_ENV`] and [`API_BASE_ENV`].
    pub fn from_env() -> Result<Self, ApiError> {
        Self::resolve(None, None)
    }

    /// Uses the explicit values when given (command line flags), falling back
    /// to the environment for the rest.
    pub fn resolve(api_key: Option<String>, base_url: Option<String>) -> Result<Self, ApiError> {
        let api_key = non_blank(api_key)
            .or_else(|| non_blank(env::var(API_KEY_ENV).ok()))
            .ok_or_else(|| ApiError::configuration(format!("missing {API_KEY_ENV}")))?;
        let base_url = non_blank(base_url)
            .or_else(|| non_blank(env::var(API_BASE_ENV).ok()))
            .ok_or_else(|| ApiError::configuration(format!("missing {API_BASE_ENV}")))?;
        Self::new(api_key, base_url)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for ComicVineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComicVineConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn validate_base_url(base: &str) -> Result<(), ApiError> {
    let parsed = Url::parse(base)
        .map_err(|error| ApiError::configuration(format!("invalid {API_BASE_ENV} URL '{base}': {error}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::configuration(format!(
            "{API_BASE_ENV} must use http or https; got '{}://'",
            parsed.scheme()
        )));
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| ApiError::configuration(format!("{API_BASE_ENV} must include a host")))?;

    if is_loopback_host(host) {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        return Err(ApiError::configuration(format!(
            "{API_BASE_ENV} must use https for non-loopback hosts; got '{}://'",
            parsed.scheme()
        )));
    }
    Ok(())
}

fn is_loopback_host(host: &str) -> bool {
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok_and(|address| address.is_loopback())
}
