//! # Comic Vine query engine
//!
//! Turns validated tool arguments into upstream calls and upstream payloads
//! into normalized envelopes.
//!
//! - **`normalize`**: envelope defaults and record validation against the
//!   derived record schemas.
//! - **`orchestrator`**: single-call operations plus the multi-step
//!   operations that resolve an anchor entity before the real query.
//! - **`html`**: the issue digest page.
//!
//! The engine never talks HTTP itself; every call goes through a
//! [`comicvine_api::ComicVineApi`] implementation.

mod error;
pub mod html;
pub mod normalize;
pub mod orchestrator;

pub use error::ComicsError;
pub use html::{ComicsDigest, render_comics_html};
pub use normalize::{empty_page, record_schema, wrap_collection, wrap_single};
pub use orchestrator::ComicQueries;
