//! Error taxonomy for the scrape pipeline.
//!
//! Only two kinds of failure are ever fatal: a bad configuration (rejected
//! before any network activity) and a listing-page fetch that exhausts its
//! retries. Everything that goes wrong on an individual detail page is
//! absorbed by the worker and surfaces as a degraded [`crate::models::Offer`]
//! with no date, never as an error.

use thiserror::Error;

/// Errors that can escape the pipeline and terminate the run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A GET failed on every attempt; carries the last underlying cause.
    #[error("fetch failed after {attempts} attempts: {source}")]
    Transport {
        /// How many attempts were made before giving up.
        attempts: u32,
        /// The last transport-level or status error observed.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid command-line configuration, rejected before any request.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Output serialization failed.
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An output file could not be written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
