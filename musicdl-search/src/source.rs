//! Trait definition for pluggable music source backends.
//!
//! Each provider (kugou, kuwo, qqmusic, netease, migu) implements
//! [`SourceBackend`] to provide a uniform interface for querying its
//! search endpoint and mapping the payload onto [`Track`] records.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{MusicSource, Track};

/// A pluggable music source backend.
///
/// Implementors query a specific provider's public search API and map the
/// JSON payload onto structured [`Track`] values. Each backend handles its
/// own:
///
/// - Request construction with query encoding
/// - Provider-specific headers (referers, cookies)
/// - Payload deserialisation and field mapping
/// - Truncation to the configured per-source result cap
///
/// All implementations must be `Send + Sync` for concurrent source queries.
pub trait SourceBackend: Send + Sync {
    /// Search this provider and return mapped results.
    ///
    /// # Arguments
    ///
    /// * `keyword` — The search keyword (implementations handle encoding).
    /// * `config` — Search configuration controlling timeouts, proxies,
    ///   and the per-source result cap.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the HTTP request fails or the response
    /// payload cannot be parsed.
    fn search(
        &self,
        keyword: &str,
        config: &SearchConfig,
    ) -> impl std::future::Future<Output = Result<Vec<Track>, SearchError>> + Send;

    /// Returns which [`MusicSource`] this implementation represents.
    fn source_type(&self) -> MusicSource;
}
