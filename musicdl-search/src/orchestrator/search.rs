//! Core search pipeline: client fan-out, flatten, normalize, rank.

use crate::client::{GroupedTracks, MusicClient};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::Track;

use super::rank::rank;
use super::scoring::{normalize_tracks, ScoringPolicy};

/// Orchestrate a search across the requested sources.
///
/// # Pipeline
///
/// 1. Fan out to all requested sources through [`MusicClient`]
/// 2. Flatten the per-source grouping by concatenation, in the order the
///    client yields groups
/// 3. Derive `has_lyric` and `score` for every track (policy taken from
///    the configuration's `algorithm`, unknown names fall back to default)
/// 4. Stable-sort by score, descending
///
/// An empty source set, or sources that all fail or return nothing, yields
/// an empty sequence rather than an error.
///
/// # Errors
///
/// Returns [`SearchError::Config`] only for an invalid configuration;
/// per-source failures are tolerated inside the client.
pub async fn orchestrate_search(
    keyword: &str,
    config: &SearchConfig,
    sources: &[String],
) -> Result<Vec<Track>, SearchError> {
    let client = MusicClient::new(config.clone())?;
    let grouped = client.search(keyword, sources).await;

    let policy = ScoringPolicy::from_name(&config.algorithm);
    let ranked = aggregate(grouped, policy);

    tracing::debug!(count = ranked.len(), keyword, "search complete");
    Ok(ranked)
}

/// The pure aggregation pipeline downstream of the client call:
/// flatten → normalize → rank.
///
/// Flattening concatenates each group's tracks in grouping order, so the
/// ranked output's tie order is source order, then per-source original
/// order.
pub fn aggregate(grouped: GroupedTracks, policy: ScoringPolicy) -> Vec<Track> {
    let flat: Vec<Track> = grouped
        .into_iter()
        .flat_map(|(_, tracks)| tracks)
        .collect();
    rank(normalize_tracks(flat, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, source: &str, ext: Option<&str>) -> Track {
        Track {
            song_id: Some(id.into()),
            source: source.into(),
            ext: ext.map(str::to_string),
            ..Default::default()
        }
    }

    fn ids(tracks: &[Track]) -> Vec<&str> {
        tracks
            .iter()
            .map(|t| t.song_id.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn aggregate_flattens_in_group_order() {
        let grouped: GroupedTracks = vec![
            (
                "kugou".into(),
                vec![track("k1", "kugou", None), track("k2", "kugou", None)],
            ),
            ("netease".into(), vec![track("n1", "netease", None)]),
        ];
        let ranked = aggregate(grouped, ScoringPolicy::Default);
        assert_eq!(ids(&ranked), vec!["k1", "k2", "n1"]);
    }

    #[test]
    fn aggregate_ranks_across_sources() {
        let grouped: GroupedTracks = vec![
            ("kugou".into(), vec![track("plain", "kugou", Some("mp3"))]),
            (
                "qqmusic".into(),
                vec![track("lossless", "qqmusic", Some("flac"))],
            ),
        ];
        let ranked = aggregate(grouped, ScoringPolicy::Default);
        assert_eq!(ids(&ranked), vec!["lossless", "plain"]);
        assert_eq!(ranked[0].score, 5);
        assert_eq!(ranked[1].score, 0);
    }

    #[test]
    fn aggregate_empty_grouping_yields_empty() {
        let ranked = aggregate(vec![], ScoringPolicy::Default);
        assert!(ranked.is_empty());
    }

    #[test]
    fn aggregate_preserves_every_track() {
        let grouped: GroupedTracks = vec![
            (
                "kugou".into(),
                vec![
                    track("a", "kugou", Some("flac")),
                    track("b", "kugou", None),
                ],
            ),
            (
                "migu".into(),
                vec![track("c", "migu", None), track("d", "migu", Some("flac"))],
            ),
        ];
        let ranked = aggregate(grouped, ScoringPolicy::Default);
        assert_eq!(ranked.len(), 4);
        let mut seen = ids(&ranked);
        seen.sort_unstable();
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn empty_source_set_is_not_an_error() {
        let config = SearchConfig::default();
        let ranked = orchestrate_search("anything", &config, &[])
            .await
            .expect("empty sources must not fail");
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let config = SearchConfig {
            search_size_per_source: 0,
            ..Default::default()
        };
        let result = orchestrate_search("anything", &config, &[]).await;
        assert!(result.is_err());
    }
}
