//! Core types for music search results and source identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker for whether a track carries usable lyric text.
///
/// Derived during normalization: a track is lyric-available only when its
/// `lyric` field holds strictly more than 50 characters, which filters out
/// the placeholder strings some providers return instead of omitting the
/// field. Serialises as the literal `"Y"` / `"-"` markers shown to users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LyricFlag {
    /// Usable lyric text is present.
    #[serde(rename = "Y")]
    Available,
    /// No lyric, or only a placeholder string.
    #[default]
    #[serde(rename = "-")]
    Missing,
}

impl LyricFlag {
    /// Returns the single-character marker used in table output.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Available => "Y",
            Self::Missing => "-",
        }
    }
}

impl fmt::Display for LyricFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// A single candidate match returned by a music source for a search keyword.
///
/// Field shape is not uniform across providers: everything a provider may
/// omit is optional and falls back to a zero score contribution and a `-`
/// placeholder at render time. `has_lyric` and `score` are synthetic —
/// absent in raw provider payloads and derived during normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    /// Provider-opaque song identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_id: Option<String>,
    /// Performing artists, in provider order. Possibly empty.
    pub singers: Vec<String>,
    /// Song title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_name: Option<String>,
    /// Album title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Human-readable file size, e.g. `3.81MB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<String>,
    /// Human-readable duration, e.g. `04:15`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Full lyric text, when the provider supplies it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyric: Option<String>,
    /// Audio container/format, e.g. `flac`, `mp3`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    /// Identifier of the source that returned this track.
    pub source: String,
    /// Direct download URL, when the provider exposes one at search time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Synthetic lyric-availability marker (normalization output).
    pub has_lyric: LyricFlag,
    /// Synthetic quality score in `0..=8` (normalization output).
    pub score: u32,
}

/// Builtin music providers this crate ships backends for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicSource {
    /// Kugou — mobile search API, rich format metadata.
    Kugou,
    /// Kuwo — keyword search API.
    Kuwo,
    /// QQ Music — client search API, reports lossless sizes.
    QqMusic,
    /// Netease Cloud Music — web search API plus a lyric endpoint.
    Netease,
    /// Migu — tag search API, exposes direct media URLs.
    Migu,
}

impl MusicSource {
    /// Returns the registry identifier of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Kugou => "kugou",
            Self::Kuwo => "kuwo",
            Self::QqMusic => "qqmusic",
            Self::Netease => "netease",
            Self::Migu => "migu",
        }
    }

    /// Resolve a registry identifier back to a builtin source.
    ///
    /// Identifiers are exact lowercase matches; anything else is an
    /// unknown source the caller must tolerate.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "kugou" => Some(Self::Kugou),
            "kuwo" => Some(Self::Kuwo),
            "qqmusic" => Some(Self::QqMusic),
            "netease" => Some(Self::Netease),
            "migu" => Some(Self::Migu),
            _ => None,
        }
    }

    /// Returns all builtin sources in registry order.
    pub fn all() -> &'static [MusicSource] {
        &[
            Self::Kugou,
            Self::Kuwo,
            Self::QqMusic,
            Self::Netease,
            Self::Migu,
        ]
    }
}

impl fmt::Display for MusicSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
