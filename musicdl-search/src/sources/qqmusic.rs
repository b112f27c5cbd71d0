//! QQ Music search backend.
//!
//! Uses the client search API at `c.y.qq.com`, which reports per-quality
//! file sizes (`size128`/`size320`/`sizeflac`) and so carries the richest
//! format metadata of the builtin providers.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::SourceBackend;
use crate::types::{MusicSource, Track};
use serde::Deserialize;

use super::{format_duration, format_size};

const SEARCH_URL: &str = "https://c.y.qq.com/soso/fcgi-bin/client_search_cp";

/// QQ Music client search API backend.
pub struct QqMusicBackend;

#[derive(Debug, Deserialize)]
struct QqResponse {
    code: i64,
    data: Option<QqData>,
}

#[derive(Debug, Deserialize)]
struct QqData {
    song: Option<QqSongList>,
}

#[derive(Debug, Deserialize)]
struct QqSongList {
    #[serde(default)]
    list: Vec<QqSong>,
}

#[derive(Debug, Deserialize)]
struct QqSong {
    songmid: Option<String>,
    songname: Option<String>,
    #[serde(default)]
    singer: Vec<QqSinger>,
    albumname: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    interval: u64,
    #[serde(default)]
    size128: u64,
    #[serde(default)]
    size320: u64,
    #[serde(default)]
    sizeflac: u64,
}

#[derive(Debug, Deserialize)]
struct QqSinger {
    name: Option<String>,
}

impl SourceBackend for QqMusicBackend {
    async fn search(
        &self,
        keyword: &str,
        config: &SearchConfig,
    ) -> Result<Vec<Track>, SearchError> {
        tracing::trace!(keyword, "qqmusic search");

        let client = http::build_client(config)?;
        let count = config.search_size_per_source.to_string();

        let response = client
            .get(SEARCH_URL)
            .header("Referer", "https://y.qq.com")
            .query(&[
                ("w", keyword),
                ("n", count.as_str()),
                ("p", "1"),
                ("cr", "1"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("qqmusic request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("qqmusic HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("qqmusic response read failed: {e}")))?;

        parse_qqmusic_response(&body, config.search_size_per_source)
    }

    fn source_type(&self) -> MusicSource {
        MusicSource::QqMusic
    }
}

/// Parse a QQ Music search payload into tracks.
///
/// Extracted as a separate function for testability with fixture payloads.
/// The best available quality wins: flac when `sizeflac` is non-zero,
/// otherwise 320k/128k mp3.
pub(crate) fn parse_qqmusic_response(body: &str, cap: usize) -> Result<Vec<Track>, SearchError> {
    let payload: QqResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("qqmusic payload: {e}")))?;

    if payload.code != 0 {
        return Err(SearchError::Parse(format!(
            "qqmusic returned code {}",
            payload.code
        )));
    }

    let songs = payload
        .data
        .and_then(|d| d.song)
        .map(|s| s.list)
        .unwrap_or_default();
    let mut tracks = Vec::new();

    for song in songs {
        let (size, ext) = if song.sizeflac > 0 {
            (song.sizeflac, Some("flac".to_string()))
        } else if song.size320 > 0 {
            (song.size320, Some("mp3".to_string()))
        } else if song.size128 > 0 {
            (song.size128, Some("mp3".to_string()))
        } else {
            (0, None)
        };

        tracks.push(Track {
            song_id: song.songmid,
            singers: song
                .singer
                .into_iter()
                .filter_map(|singer| singer.name)
                .collect(),
            song_name: song.songname,
            album: song.albumname.filter(|name| !name.is_empty()),
            filesize: (size > 0).then(|| format_size(size)),
            duration: (song.interval > 0).then(|| format_duration(song.interval)),
            ext,
            source: MusicSource::QqMusic.name().to_string(),
            ..Default::default()
        });

        if tracks.len() >= cap {
            break;
        }
    }

    tracing::debug!(count = tracks.len(), "qqmusic results parsed");
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_QQ_JSON: &str = r#"{
        "code": 0,
        "data": {
            "song": {
                "list": [
                    {
                        "songmid": "003aAYrm3GE0Ac",
                        "songname": "晴天",
                        "singer": [{"name": "周杰伦"}],
                        "albumname": "叶惠美",
                        "interval": 269,
                        "size128": 4310941,
                        "size320": 10777353,
                        "sizeflac": 28974203
                    },
                    {
                        "songmid": "002tMkPD3kfvpP",
                        "songname": "晴天 (Live)",
                        "singer": [{"name": "周杰伦"}, {"name": "aMEI"}],
                        "albumname": "",
                        "interval": 312,
                        "size128": 5000000,
                        "size320": 12500000,
                        "sizeflac": 0
                    },
                    {
                        "songmid": "000xyzzy000000",
                        "songname": "晴天 (铃声)",
                        "singer": [],
                        "albumname": "",
                        "interval": 0,
                        "size128": 0,
                        "size320": 0,
                        "sizeflac": 0
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn parse_mock_payload_returns_tracks() {
        let tracks = parse_qqmusic_response(MOCK_QQ_JSON, 10).expect("should parse");
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[0].song_id.as_deref(), Some("003aAYrm3GE0Ac"));
        assert_eq!(tracks[0].song_name.as_deref(), Some("晴天"));
        assert_eq!(tracks[0].album.as_deref(), Some("叶惠美"));
        assert_eq!(tracks[0].source, "qqmusic");
    }

    #[test]
    fn best_quality_wins() {
        let tracks = parse_qqmusic_response(MOCK_QQ_JSON, 10).expect("should parse");
        assert_eq!(tracks[0].ext.as_deref(), Some("flac"));
        assert_eq!(tracks[0].filesize.as_deref(), Some("27.63MB"));

        assert_eq!(tracks[1].ext.as_deref(), Some("mp3"));
        assert_eq!(tracks[1].filesize.as_deref(), Some("11.92MB"));

        assert!(tracks[2].ext.is_none());
        assert!(tracks[2].filesize.is_none());
    }

    #[test]
    fn multiple_singers_collected() {
        let tracks = parse_qqmusic_response(MOCK_QQ_JSON, 10).expect("should parse");
        assert_eq!(
            tracks[1].singers,
            vec!["周杰伦".to_string(), "aMEI".to_string()]
        );
    }

    #[test]
    fn cap_respected() {
        let tracks = parse_qqmusic_response(MOCK_QQ_JSON, 1).expect("should parse");
        assert_eq!(tracks.len(), 1);
    }

    #[test]
    fn non_success_code_is_parse_error() {
        let err = parse_qqmusic_response(r#"{"code": 500, "data": null}"#, 10).unwrap_err();
        assert!(err.to_string().contains("code 500"));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = parse_qqmusic_response("jsonp_callback({})", 10).unwrap_err();
        assert!(err.to_string().contains("qqmusic payload"));
    }

    #[test]
    fn missing_song_list_yields_empty() {
        let body = r#"{"code": 0, "data": {"song": null}}"#;
        let tracks = parse_qqmusic_response(body, 10).expect("should parse");
        assert!(tracks.is_empty());
    }

    #[test]
    fn source_type_is_qqmusic() {
        assert_eq!(QqMusicBackend.source_type(), MusicSource::QqMusic);
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_qqmusic_search() {
        let backend = QqMusicBackend;
        let config = SearchConfig::default();
        let tracks = backend.search("周杰伦", &config).await;
        assert!(tracks.is_ok());
        assert!(!tracks.expect("live search should work").is_empty());
    }
}
