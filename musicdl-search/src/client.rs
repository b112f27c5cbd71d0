//! Multi-source client: concurrent per-source fan-out with failure tolerance.
//!
//! [`MusicClient`] queries every requested source concurrently and returns
//! the per-source groupings as an ordered mapping. A source that fails or
//! is unknown simply has no entry in the result; one bad provider never
//! fails the whole search.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::source::SourceBackend;
use crate::sources::{KugouBackend, KuwoBackend, MiguBackend, NeteaseBackend, QqMusicBackend};
use crate::types::{MusicSource, Track};

/// Per-source result grouping, ordered by requested source.
///
/// An ordered mapping rather than a hash map: flattening iterates entries
/// in this order, and the ranking's tie-stability guarantee is defined
/// over exactly that iteration order.
pub type GroupedTracks = Vec<(String, Vec<Track>)>;

/// Client querying a set of music sources for a keyword.
#[derive(Debug, Clone)]
pub struct MusicClient {
    config: SearchConfig,
}

impl MusicClient {
    /// Create a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Query all requested sources concurrently.
    ///
    /// Returns one entry per source that produced results, in requested
    /// order. Sources without a registered backend are skipped at debug
    /// level; per-source failures are logged at warn level and skipped.
    /// An empty `sources` slice yields an empty grouping.
    pub async fn search(&self, keyword: &str, sources: &[String]) -> GroupedTracks {
        let futures: Vec<_> = sources
            .iter()
            .map(|name| {
                let keyword = keyword.to_string();
                let config = self.config.clone();
                async move {
                    let outcome = match MusicSource::from_name(name) {
                        Some(source) => Some(query_source(source, &keyword, &config).await),
                        None => None,
                    };
                    (name.clone(), outcome)
                }
            })
            .collect();

        // join_all preserves input order, so the grouping comes back in
        // requested-source order regardless of completion order.
        let outcomes = futures::future::join_all(futures).await;

        let mut grouped: GroupedTracks = Vec::new();
        for (name, outcome) in outcomes {
            match outcome {
                None => {
                    tracing::debug!(source = %name, "no backend registered, skipping");
                }
                Some(Err(err)) => {
                    tracing::warn!(source = %name, error = %err, "source query failed");
                }
                Some(Ok(tracks)) => {
                    tracing::debug!(source = %name, count = tracks.len(), "source returned results");
                    grouped.push((name, tracks));
                }
            }
        }
        grouped
    }
}

/// Query a single source, dispatching to the concrete backend.
async fn query_source(
    source: MusicSource,
    keyword: &str,
    config: &SearchConfig,
) -> Result<Vec<Track>, SearchError> {
    match source {
        MusicSource::Kugou => KugouBackend.search(keyword, config).await,
        MusicSource::Kuwo => KuwoBackend.search(keyword, config).await,
        MusicSource::QqMusic => QqMusicBackend.search(keyword, config).await,
        MusicSource::Netease => NeteaseBackend.search(keyword, config).await,
        MusicSource::Migu => MiguBackend.search(keyword, config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_rejects_invalid_config() {
        let config = SearchConfig {
            search_size_per_source: 0,
            ..Default::default()
        };
        assert!(MusicClient::new(config).is_err());
    }

    #[test]
    fn client_accepts_default_config() {
        assert!(MusicClient::new(SearchConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn empty_source_set_yields_empty_grouping() {
        let client = MusicClient::new(SearchConfig::default()).expect("valid config");
        let grouped = client.search("anything", &[]).await;
        assert!(grouped.is_empty());
    }

    #[tokio::test]
    async fn unknown_sources_yield_absent_entries() {
        let client = MusicClient::new(SearchConfig::default()).expect("valid config");
        let sources = vec!["joox".to_string(), "yiting".to_string()];
        let grouped = client.search("anything", &sources).await;
        // No backends registered for these identifiers, so no network is
        // touched and no entries come back.
        assert!(grouped.is_empty());
    }
}
