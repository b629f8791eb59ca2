//! Shared types for the Comic Vine tool server.
//!
//! The crate is deliberately free of I/O: it describes what the upstream
//! catalogue looks like (resource kinds, records, envelopes) and what callers
//! may ask for (page and search requests). Validation and transport live in
//! the `comicvine-util` and `comicvine-api` crates.

pub mod envelope;
pub mod records;
pub mod requests;
pub mod resource;

pub use envelope::{DEFAULT_LIMIT, DEFAULT_OFFSET, Envelope, OK_MESSAGE, STATUS_OK};
pub use records::{
    Character, CrossReference, Image, Issue, Movie, Publisher, RecordShape, Resource, SearchResult, Team, Volume,
};
pub use requests::{ComicsHtmlRequest, NameRequest, PageRequest, SearchRequest};
pub use resource::ResourceKind;
