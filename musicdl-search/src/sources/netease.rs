//! Netease Cloud Music search backend.
//!
//! Uses the web search API at `music.163.com`. Netease is the only builtin
//! provider with an unauthenticated lyric endpoint, so this backend also
//! resolves full lyric text per result; a failed lyric lookup degrades to
//! an absent field rather than failing the search.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::SourceBackend;
use crate::types::{MusicSource, Track};
use serde::Deserialize;

use super::format_duration;

const SEARCH_URL: &str = "http://music.163.com/api/search/get/web";
const LYRIC_URL: &str = "http://music.163.com/api/song/lyric";

/// Netease web search API backend.
pub struct NeteaseBackend;

#[derive(Debug, Deserialize)]
struct NeteaseResponse {
    code: i64,
    result: Option<NeteaseResult>,
}

#[derive(Debug, Deserialize)]
struct NeteaseResult {
    #[serde(default)]
    songs: Vec<NeteaseSong>,
}

#[derive(Debug, Deserialize)]
struct NeteaseSong {
    id: i64,
    name: Option<String>,
    #[serde(default)]
    artists: Vec<NeteaseArtist>,
    album: Option<NeteaseAlbum>,
    /// Duration in milliseconds.
    #[serde(default)]
    duration: u64,
}

#[derive(Debug, Deserialize)]
struct NeteaseArtist {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NeteaseAlbum {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NeteaseLyricResponse {
    lrc: Option<NeteaseLrc>,
}

#[derive(Debug, Deserialize)]
struct NeteaseLrc {
    lyric: Option<String>,
}

impl SourceBackend for NeteaseBackend {
    async fn search(
        &self,
        keyword: &str,
        config: &SearchConfig,
    ) -> Result<Vec<Track>, SearchError> {
        tracing::trace!(keyword, "netease search");

        let client = http::build_client(config)?;
        let limit = config.search_size_per_source.to_string();

        let response = client
            .post(SEARCH_URL)
            .header("Referer", "http://music.163.com")
            .form(&[
                ("s", keyword),
                ("type", "1"),
                ("limit", limit.as_str()),
                ("offset", "0"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("netease request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("netease HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("netease response read failed: {e}")))?;

        let mut tracks = parse_netease_response(&body, config.search_size_per_source)?;

        // Lyric lookups are best-effort enrichment.
        for track in &mut tracks {
            let Some(id) = track.song_id.clone() else {
                continue;
            };
            match fetch_lyric(&client, &id).await {
                Ok(lyric) => track.lyric = lyric,
                Err(err) => {
                    tracing::debug!(song_id = %id, error = %err, "netease lyric lookup failed");
                }
            }
        }

        Ok(tracks)
    }

    fn source_type(&self) -> MusicSource {
        MusicSource::Netease
    }
}

async fn fetch_lyric(
    client: &reqwest::Client,
    song_id: &str,
) -> Result<Option<String>, SearchError> {
    let response = client
        .get(LYRIC_URL)
        .header("Referer", "http://music.163.com")
        .query(&[("id", song_id), ("lv", "-1"), ("kv", "-1"), ("tv", "-1")])
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("netease lyric request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Http(format!("netease lyric HTTP error: {e}")))?;

    let body = response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("netease lyric read failed: {e}")))?;

    parse_netease_lyric(&body)
}

/// Parse a netease search payload into tracks.
///
/// Extracted as a separate function for testability with fixture payloads.
pub(crate) fn parse_netease_response(body: &str, cap: usize) -> Result<Vec<Track>, SearchError> {
    let payload: NeteaseResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("netease payload: {e}")))?;

    if payload.code != 200 {
        return Err(SearchError::Parse(format!(
            "netease returned code {}",
            payload.code
        )));
    }

    let songs = payload.result.map(|r| r.songs).unwrap_or_default();
    let mut tracks = Vec::new();

    for song in songs {
        let seconds = song.duration / 1000;
        tracks.push(Track {
            song_id: Some(song.id.to_string()),
            singers: song
                .artists
                .into_iter()
                .filter_map(|artist| artist.name)
                .collect(),
            song_name: song.name,
            album: song.album.and_then(|a| a.name).filter(|name| !name.is_empty()),
            duration: (seconds > 0).then(|| format_duration(seconds)),
            ext: Some("mp3".to_string()),
            source: MusicSource::Netease.name().to_string(),
            ..Default::default()
        });

        if tracks.len() >= cap {
            break;
        }
    }

    tracing::debug!(count = tracks.len(), "netease results parsed");
    Ok(tracks)
}

/// Parse a netease lyric payload into the lyric text, if any.
pub(crate) fn parse_netease_lyric(body: &str) -> Result<Option<String>, SearchError> {
    let payload: NeteaseLyricResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("netease lyric payload: {e}")))?;

    Ok(payload
        .lrc
        .and_then(|lrc| lrc.lyric)
        .filter(|text| !text.is_empty()))
}
