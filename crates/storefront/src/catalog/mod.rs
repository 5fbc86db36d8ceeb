//! Remote plant catalog API client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`; two read-only endpoints
//! - The catalog API is the source of truth - no local copy beyond the
//!   visitor's last fetch, no caching, no retries, no timeouts
//! - Responses are normalized once, in [`conversions`], into the canonical
//!   `green_earth_core` types; nothing downstream looks at raw JSON
//!
//! # Endpoints
//!
//! ```text
//! GET {base}/categories      - { "categories": [...] }
//! GET {base}/plants          - { "plants": [...] }
//! GET {base}/category/{id}   - { "plants": [...] } or { "data": [...] }
//! ```

mod client;
pub mod conversions;

pub use client::CatalogClient;

use thiserror::Error;

/// Network-level failure talking to the catalog API.
///
/// The caller decides the fallback UI; errors are reported once and never
/// retried.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog API returned {status}")]
    Status {
        /// Status code returned by the API.
        status: reqwest::StatusCode,
    },

    /// The response body was not JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot carry path segments.
    #[error("Catalog base URL cannot be extended: {0}")]
    InvalidBaseUrl(String),
}
