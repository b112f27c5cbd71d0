//! # musicdl-search
//!
//! Multi-source music search and ranking engine for musicdl.
//!
//! This crate queries a configurable set of music providers directly — no
//! API keys, no external services — aggregates their heterogeneous results,
//! and returns one deterministically ranked list. It compiles into the
//! musicdl binary as a library dependency.
//!
//! ## Design
//!
//! - Queries kugou, kuwo, qqmusic, netease, and migu via their public
//!   JSON search APIs
//! - Fans out per-source requests concurrently; a failing source is
//!   skipped, never fatal
//! - Normalizes each result into a lyric-availability marker and an
//!   integer quality score under a pluggable scoring policy
//! - Ranks with a stable descending sort, so equal-score results keep
//!   source order then per-source order
//! - User-Agent rotation and an optional proxy map for request plumbing

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod registry;
pub mod source;
pub mod sources;
pub mod types;

pub use client::MusicClient;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::scoring::ScoringPolicy;
pub use source::SourceBackend;
pub use types::{LyricFlag, MusicSource, Track};

/// Search the requested sources and return one ranked result list.
///
/// Queries every identifier in `sources` concurrently, flattens the
/// per-source results, derives ranking fields under the configuration's
/// scoring policy, and returns the stable descending ordering. Sources
/// that fail or are unknown are skipped; an empty `sources` slice yields
/// an empty list.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the configuration is invalid.
/// Per-source failures never fail the overall search.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> musicdl_search::Result<()> {
/// let config = musicdl_search::SearchConfig::default();
/// let sources = musicdl_search::registry::resolve(None);
/// let tracks = musicdl_search::search("晴天", &config, &sources).await?;
/// for track in &tracks {
///     println!("{}: {:?}", track.score, track.song_name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    keyword: &str,
    config: &SearchConfig,
    sources: &[String],
) -> Result<Vec<Track>> {
    config.validate()?;
    orchestrator::search::orchestrate_search(keyword, config, sources).await
}
