//! Pure helpers shared across the Comic Vine crates: query parameter
//! normalization, JSON-schema shape validation, text processing and date
//! formatting.

pub mod date_handling;
pub mod query;
pub mod schema_validation;
pub mod text_processing;

pub use date_handling::format_cover_date;
pub use query::{QueryParams, QueryValue, normalize_query_params};
pub use schema_validation::{Violation, collect_schema_violations, summarize_violations, validate_against_schema};
pub use text_processing::{escape_html, redact_sensitive, strip_html_tags, truncate_with_ellipsis};
