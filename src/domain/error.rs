//! Error types for the tagtable plugin.
//!
//! This module defines the centralized error type [`TagTableError`] and a type alias
//! [`Result`] used across the crate. Errors are implemented with `thiserror`.
//!
//! Only a failed page request is a real error in the fetch pipeline. Malformed
//! payloads and invalid records are absorbed where they occur and never surface
//! here.

use thiserror::Error;

/// The main error type for tagtable operations.
///
/// # Examples
///
/// ```
/// use tagtable::domain::TagTableError;
///
/// let err = TagTableError::Http {
///     page: 11,
///     status: 503,
///     message: "service unavailable".to_string(),
/// };
/// assert_eq!(err.to_string(), "Request for page 11 failed with status 503: service unavailable");
/// ```
#[derive(Debug, Error)]
pub enum TagTableError {
    /// A page request failed (transport failure or non-success status).
    ///
    /// Aborts the remaining fetch sequence. Already accumulated items are kept.
    #[error("Request for page {page} failed with status {status}: {message}")]
    Http {
        /// One-based page number of the failed request.
        page: u32,
        /// Status code reported by the host.
        status: u16,
        /// Response body or host error text, truncated for display.
        message: String,
    },

    /// The host refused web access, so no page can be requested.
    #[error("Web access permission was denied")]
    PermissionDenied,

    /// The request URL could not be built from the configured endpoint.
    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for tagtable operations.
pub type Result<T> = std::result::Result<T, TagTableError>;
