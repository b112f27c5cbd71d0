//! Migu search backend.
//!
//! Uses the tag search API at `m.music.migu.cn`, which is the only builtin
//! provider exposing direct media URLs in the search payload; the format
//! is derived from the media URL's file extension.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::SourceBackend;
use crate::types::{MusicSource, Track};
use serde::Deserialize;
use url::Url;

use super::split_names;

const SEARCH_URL: &str = "https://m.music.migu.cn/migu/remoting/scr_search_tag";

/// Migu tag search API backend.
pub struct MiguBackend;

#[derive(Debug, Deserialize)]
struct MiguResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    musics: Vec<MiguSong>,
}

#[derive(Debug, Deserialize)]
struct MiguSong {
    #[serde(rename = "songId")]
    song_id: Option<String>,
    #[serde(rename = "songName")]
    song_name: Option<String>,
    #[serde(rename = "singerName")]
    singer_name: Option<String>,
    #[serde(rename = "albumName")]
    album_name: Option<String>,
    mp3: Option<String>,
}

impl SourceBackend for MiguBackend {
    async fn search(
        &self,
        keyword: &str,
        config: &SearchConfig,
    ) -> Result<Vec<Track>, SearchError> {
        tracing::trace!(keyword, "migu search");

        let client = http::build_client(config)?;
        let rows = config.search_size_per_source.to_string();

        let response = client
            .get(SEARCH_URL)
            .query(&[
                ("keyword", keyword),
                ("type", "2"),
                ("pgc", "1"),
                ("rows", rows.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("migu request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("migu HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("migu response read failed: {e}")))?;

        parse_migu_response(&body, config.search_size_per_source)
    }

    fn source_type(&self) -> MusicSource {
        MusicSource::Migu
    }
}

/// Parse a migu search payload into tracks.
///
/// Extracted as a separate function for testability with fixture payloads.
pub(crate) fn parse_migu_response(body: &str, cap: usize) -> Result<Vec<Track>, SearchError> {
    let payload: MiguResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("migu payload: {e}")))?;

    if !payload.success {
        return Err(SearchError::Parse("migu returned success=false".into()));
    }

    let mut tracks = Vec::new();

    for song in payload.musics {
        let download_url = song.mp3.filter(|link| !link.is_empty());
        tracks.push(Track {
            song_id: song.song_id,
            singers: song
                .singer_name
                .as_deref()
                .map(|raw| split_names(raw, ','))
                .unwrap_or_default(),
            song_name: song.song_name,
            album: song.album_name.filter(|name| !name.is_empty()),
            ext: download_url.as_deref().and_then(ext_from_url),
            download_url,
            source: MusicSource::Migu.name().to_string(),
            ..Default::default()
        });

        if tracks.len() >= cap {
            break;
        }
    }

    tracing::debug!(count = tracks.len(), "migu results parsed");
    Ok(tracks)
}

/// Derive an audio format from a media URL's path extension.
fn ext_from_url(link: &str) -> Option<String> {
    let parsed = Url::parse(link).ok()?;
    let path = parsed.path();
    let (stem, ext) = path.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_MIGU_JSON: &str = r#"{
        "success": true,
        "pgt": 10,
        "musics": [
            {
                "songId": "63273402",
                "songName": "晴天",
                "singerName": "周杰伦",
                "albumName": "叶惠美",
                "mp3": "https://freetyst.nf.migu.cn/public/product5th/63273402.mp3"
            },
            {
                "songId": "63273403",
                "songName": "晴天 (无损)",
                "singerName": "周杰伦, 张惠妹",
                "albumName": "",
                "mp3": "https://freetyst.nf.migu.cn/public/product5th/63273403.flac"
            },
            {
                "songId": "63273404",
                "songName": "晴天 (预览)",
                "singerName": "",
                "albumName": null,
                "mp3": ""
            }
        ]
    }"#;

    #[test]
    fn parse_mock_payload_returns_tracks() {
        let tracks = parse_migu_response(MOCK_MIGU_JSON, 10).expect("should parse");
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[0].song_id.as_deref(), Some("63273402"));
        assert_eq!(tracks[0].song_name.as_deref(), Some("晴天"));
        assert_eq!(tracks[0].album.as_deref(), Some("叶惠美"));
        assert_eq!(tracks[0].source, "migu");
    }

    #[test]
    fn download_url_and_format_derived() {
        let tracks = parse_migu_response(MOCK_MIGU_JSON, 10).expect("should parse");
        assert!(tracks[0]
            .download_url
            .as_deref()
            .expect("url present")
            .ends_with(".mp3"));
        assert_eq!(tracks[0].ext.as_deref(), Some("mp3"));

        assert_eq!(tracks[1].ext.as_deref(), Some("flac"));

        assert!(tracks[2].download_url.is_none());
        assert!(tracks[2].ext.is_none());
    }

    #[test]
    fn joined_singers_split_on_comma() {
        let tracks = parse_migu_response(MOCK_MIGU_JSON, 10).expect("should parse");
        assert_eq!(
            tracks[1].singers,
            vec!["周杰伦".to_string(), "张惠妹".to_string()]
        );
        assert!(tracks[2].singers.is_empty());
    }

    #[test]
    fn cap_respected() {
        let tracks = parse_migu_response(MOCK_MIGU_JSON, 2).expect("should parse");
        assert_eq!(tracks.len(), 2);
    }

    #[test]
    fn failure_payload_is_parse_error() {
        let err = parse_migu_response(r#"{"success": false, "musics": []}"#, 10).unwrap_err();
        assert!(err.to_string().contains("success=false"));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = parse_migu_response("<html></html>", 10).unwrap_err();
        assert!(err.to_string().contains("migu payload"));
    }

    #[test]
    fn ext_from_url_handles_edge_cases() {
        assert_eq!(
            ext_from_url("https://example.com/a/song.FLAC"),
            Some("flac".to_string())
        );
        assert_eq!(ext_from_url("https://example.com/noext"), None);
        assert_eq!(ext_from_url("not a url"), None);
    }

    #[test]
    fn source_type_is_migu() {
        assert_eq!(MiguBackend.source_type(), MusicSource::Migu);
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_migu_search() {
        let backend = MiguBackend;
        let config = SearchConfig::default();
        let tracks = backend.search("周杰伦", &config).await;
        assert!(tracks.is_ok());
        assert!(!tracks.expect("live search should work").is_empty());
    }
}
