//! Error types for the musicdl-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Provider payloads and proxy credentials
//! never appear in error messages verbatim.

/// Errors that can occur during music search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// An HTTP request to a music provider failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a provider response payload.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience type alias for musicdl-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
