//! Error types for fetching and ingestion

use thiserror::Error;

/// Errors that make a page fetch fail
///
/// Any of these is fatal to an ingestion run: nothing is saved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network, TLS or body decoding failure
    #[error("Request failed: {0}")]
    Request(String),

    /// No complete response before the timeout
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// Errors that abort an ingestion run outside the per-item loop
#[derive(Error, Debug)]
pub enum IngestError {
    /// Record store error while clearing or counting
    #[error("Store error: {0}")]
    Store(String),

    /// The shared store lock was poisoned by a panicking holder
    #[error("Store lock error: {0}")]
    Lock(String),
}
