//! Kugou search backend.
//!
//! Uses the mobile CDN search API at `mobilecdn.kugou.com`, which requires
//! no authentication and returns format metadata including lossless
//! (`sq*`) variants when available.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::SourceBackend;
use crate::types::{MusicSource, Track};
use serde::Deserialize;

use super::{format_duration, format_size, split_names};

const SEARCH_URL: &str = "http://mobilecdn.kugou.com/api/v3/search/song";

/// Kugou search API backend.
pub struct KugouBackend;

#[derive(Debug, Deserialize)]
struct KugouResponse {
    status: i64,
    data: Option<KugouData>,
}

#[derive(Debug, Deserialize)]
struct KugouData {
    #[serde(default)]
    info: Vec<KugouSong>,
}

#[derive(Debug, Deserialize)]
struct KugouSong {
    hash: Option<String>,
    songname: Option<String>,
    singername: Option<String>,
    album_name: Option<String>,
    #[serde(default)]
    filesize: u64,
    #[serde(default)]
    sqfilesize: u64,
    sqhash: Option<String>,
    #[serde(default)]
    duration: u64,
    extname: Option<String>,
}

impl SourceBackend for KugouBackend {
    async fn search(
        &self,
        keyword: &str,
        config: &SearchConfig,
    ) -> Result<Vec<Track>, SearchError> {
        tracing::trace!(keyword, "kugou search");

        let client = http::build_client(config)?;
        let pagesize = config.search_size_per_source.to_string();

        let response = client
            .get(SEARCH_URL)
            .query(&[
                ("format", "json"),
                ("keyword", keyword),
                ("page", "1"),
                ("pagesize", pagesize.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("kugou request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("kugou HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("kugou response read failed: {e}")))?;

        parse_kugou_response(&body, config.search_size_per_source)
    }

    fn source_type(&self) -> MusicSource {
        MusicSource::Kugou
    }
}

/// Parse a kugou search payload into tracks.
///
/// Extracted as a separate function for testability with fixture payloads.
/// When a song carries a lossless (`sq*`) variant, that variant's hash and
/// size are preferred and the format is reported as `flac`.
pub(crate) fn parse_kugou_response(body: &str, cap: usize) -> Result<Vec<Track>, SearchError> {
    let payload: KugouResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("kugou payload: {e}")))?;

    if payload.status != 1 {
        return Err(SearchError::Parse(format!(
            "kugou returned status {}",
            payload.status
        )));
    }

    let songs = payload.data.map(|d| d.info).unwrap_or_default();
    let mut tracks = Vec::new();

    for song in songs {
        let lossless = song.sqfilesize > 0 && song.sqhash.is_some();
        let (song_id, filesize, ext) = if lossless {
            (song.sqhash, song.sqfilesize, Some("flac".to_string()))
        } else {
            (
                song.hash,
                song.filesize,
                song.extname.or_else(|| Some("mp3".to_string())),
            )
        };

        tracks.push(Track {
            song_id,
            singers: song
                .singername
                .as_deref()
                .map(|raw| split_names(raw, '、'))
                .unwrap_or_default(),
            song_name: song.songname,
            album: song.album_name,
            filesize: (filesize > 0).then(|| format_size(filesize)),
            duration: (song.duration > 0).then(|| format_duration(song.duration)),
            ext,
            source: MusicSource::Kugou.name().to_string(),
            ..Default::default()
        });

        if tracks.len() >= cap {
            break;
        }
    }

    tracing::debug!(count = tracks.len(), "kugou results parsed");
    Ok(tracks)
}
