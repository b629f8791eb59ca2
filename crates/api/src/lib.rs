//! Comic Vine API gateway.
//!
//! This crate owns the single point of contact with the upstream catalogue:
//!
//! - [`ComicVineConfig`] holds the API key and base URL, resolved once at
//!   startup from flags or the environment and validated for safety
//! - [`ComicVineApi`] is the seam the rest of the workspace talks to
//! - [`ComicVineClient`] implements it with `reqwest`, forcing `format=json`
//!   and the API key onto every request
//!
//! # Example
//!
//! ```ignore
//! use comicvine_api::{ComicVineApi, ComicVineClient, ComicVineConfig};
//! use comicvine_util::QueryParams;
//!
//! async fn run() -> Result<(), comicvine_api::ApiError> {
//!     let client = ComicVineClient::new(ComicVineConfig::from_env()?)?;
//!     let payload = client.get("/characters", &QueryParams::new()).await?;
//!     println!("{}", payload["number_of_total_results"]);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{ComicVineApi, ComicVineClient, USER_AGENT};
pub use config::{API_BASE_ENV, API_KEY_ENV, ComicVineConfig};
pub use error::ApiError;
