//! # Text Processing Utilities
//!
//! Secret redaction for log output and the small set of HTML text helpers
//! the digest renderer needs.

use once_cell::sync::Lazy;
use regex::Regex;

/// Redacts values that look like secrets in a string.
///
/// Covers `api_key=` style query parameters, `KEY=value` assignments and
/// authorization headers. The key names are kept so that redacted URLs stay
/// readable in logs.
///
/// # Example
/// ```rust
/// use comicvine_util::text_processing::redact_sensitive;
///
/// let url = "https://comicvine.gamespot.com/api/characters?format=json&api_key=abc123";
/// assert_eq!(
///     redact_sensitive(url),
///     "https://comicvine.gamespot.com/api/characters?format=json&api_key=[REDACTED]"
/// );
/// ```
pub fn redact_sensitive(input: &str) -> String {
    redact_sensitive_with(input, "[REDACTED]")
}

/// Redacts sensitive-looking values, using a custom replacement token.
pub fn redact_sensitive_with(input: &str, replacement: &str) -> String {
    REDACT_PATTERNS.iter().fold(input.to_string(), |redacted, pattern| {
        pattern
            .replace_all(&redacted, |captures: &regex::Captures| {
                let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{prefix}{replacement}")
            })
            .into_owned()
    })
}

static REDACT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)([?&](?:api_key|apikey|token|access_token)=)([^&#\s]+)",
        r"(?i)(authorization:\s+)([^\s]+(?:\s+[^\s]+)*)",
        r"(?i)(\b[A-Z0-9_]*(?:KEY|TOKEN|SECRET|PASSWORD)=)([^\s&]+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("redaction pattern compiles"))
    .collect()
});

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]+(>|$)").expect("tag pattern compiles"));

/// Escapes the five HTML-significant characters.
///
/// ```rust
/// use comicvine_util::text_processing::escape_html;
/// assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for character in input.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Removes markup tags, keeping their text content.
pub fn strip_html_tags(input: &str) -> String {
    TAG_PATTERN.replace_all(input, "").into_owned()
}

/// Truncates to at most `max_chars` characters, appending `...` when
/// anything was cut. Counts characters, not bytes.
pub fn truncate_with_ellipsis(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &input[..byte_index]),
        None => input.to_string(),
    }
}
