#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Tick sightings source trait and the remote API client.
//!
//! The map and education pages read sightings through the
//! [`SightingsSource`] trait. [`remote::RemoteSightings`] implements it over
//! the public sightings API and never surfaces an error: any failure is
//! logged and turns into an empty list.

pub mod decode;
pub mod remote;

use async_trait::async_trait;
use ticksight_sighting_models::SightingRecord;

pub use remote::RemoteSightings;

/// Errors that can occur while fetching from the remote API.
///
/// These never reach [`SightingsSource`] callers; they exist so the fetch
/// path can use `?` and log a precise reason before degrading to an empty
/// result.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than `200 OK`.
    #[error("Unexpected HTTP status {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Returned status code.
        status: u16,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload was valid JSON but not an array.
    #[error("Expected a JSON array, got {kind}")]
    NotAnArray {
        /// JSON type that was received instead.
        kind: &'static str,
    },

    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("Invalid API URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Description of what went wrong.
        message: String,
    },
}

/// Read-only access to tick sightings.
///
/// Implementations fail soft: every method returns an empty list instead
/// of an error.
#[async_trait]
pub trait SightingsSource: Send + Sync {
    /// Returns every sighting.
    async fn fetch_all(&self) -> Vec<SightingRecord>;

    /// Returns the sightings reported in `city`. An empty city returns an
    /// empty list.
    async fn fetch_by_city(&self, city: &str) -> Vec<SightingRecord>;

    /// Returns the sightings of `species`. An empty species returns an
    /// empty list.
    async fn fetch_by_species(&self, species: &str) -> Vec<SightingRecord>;
}
