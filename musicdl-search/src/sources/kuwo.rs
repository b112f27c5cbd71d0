//! Kuwo search backend.
//!
//! Uses the keyword search API at `kuwo.cn`. The payload reports durations
//! pre-formatted as `mm:ss` strings and a lossless-availability flag
//! instead of per-quality sizes.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::SourceBackend;
use crate::types::{MusicSource, Track};
use serde::Deserialize;

use super::split_names;

const SEARCH_URL: &str = "http://www.kuwo.cn/api/www/search/searchMusicBykeyWord";

/// Kuwo keyword search API backend.
pub struct KuwoBackend;

#[derive(Debug, Deserialize)]
struct KuwoResponse {
    code: i64,
    data: Option<KuwoData>,
}

#[derive(Debug, Deserialize)]
struct KuwoData {
    #[serde(default)]
    list: Vec<KuwoSong>,
}

#[derive(Debug, Deserialize)]
struct KuwoSong {
    rid: Option<i64>,
    name: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    #[serde(rename = "songTimeMinutes")]
    song_time_minutes: Option<String>,
    #[serde(rename = "hasLossless")]
    #[serde(default)]
    has_lossless: bool,
}

impl SourceBackend for KuwoBackend {
    async fn search(
        &self,
        keyword: &str,
        config: &SearchConfig,
    ) -> Result<Vec<Track>, SearchError> {
        tracing::trace!(keyword, "kuwo search");

        let client = http::build_client(config)?;
        let rn = config.search_size_per_source.to_string();

        let response = client
            .get(SEARCH_URL)
            .header("Referer", "http://www.kuwo.cn/search/list")
            .query(&[("key", keyword), ("pn", "1"), ("rn", rn.as_str())])
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("kuwo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("kuwo HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("kuwo response read failed: {e}")))?;

        parse_kuwo_response(&body, config.search_size_per_source)
    }

    fn source_type(&self) -> MusicSource {
        MusicSource::Kuwo
    }
}

/// Parse a kuwo search payload into tracks.
///
/// Extracted as a separate function for testability with fixture payloads.
pub(crate) fn parse_kuwo_response(body: &str, cap: usize) -> Result<Vec<Track>, SearchError> {
    let payload: KuwoResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("kuwo payload: {e}")))?;

    if payload.code != 200 {
        return Err(SearchError::Parse(format!(
            "kuwo returned code {}",
            payload.code
        )));
    }

    let songs = payload.data.map(|d| d.list).unwrap_or_default();
    let mut tracks = Vec::new();

    for song in songs {
        let ext = if song.has_lossless { "flac" } else { "mp3" };
        tracks.push(Track {
            song_id: song.rid.map(|rid| rid.to_string()),
            singers: song
                .artist
                .as_deref()
                .map(|raw| split_names(raw, '&'))
                .unwrap_or_default(),
            song_name: song.name,
            album: song.album.filter(|name| !name.is_empty()),
            duration: song.song_time_minutes.filter(|time| !time.is_empty()),
            ext: Some(ext.to_string()),
            source: MusicSource::Kuwo.name().to_string(),
            ..Default::default()
        });

        if tracks.len() >= cap {
            break;
        }
    }

    tracing::debug!(count = tracks.len(), "kuwo results parsed");
    Ok(tracks)
}
