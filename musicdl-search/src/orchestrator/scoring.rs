//! Result normalization and the pluggable scoring policies.
//!
//! Normalization derives the two synthetic fields ranking needs — the
//! lyric-availability marker and the quality score — and touches nothing
//! else. Both derivations are pure: the same raw record always yields the
//! same synthetic fields.

use crate::types::{LyricFlag, Track};

/// Lyric strings at or below this character count are treated as
/// placeholders rather than usable lyrics.
const LYRIC_PLACEHOLDER_MAX: usize = 50;

/// Score awarded for lossless format, dominating the metadata signals.
const FLAC_BONUS: u32 = 5;

/// A named scoring policy mapping a normalized track to a quality score.
///
/// The policy set is open-ended by design: the CLI accepts a policy name
/// and unrecognised names resolve to [`ScoringPolicy::Default`] instead of
/// failing, so new policies can be introduced without breaking callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// Rewards richer metadata and lossless audio: +1 each for singers,
    /// album, and usable lyrics; +5 for flac. Range `0..=8`.
    #[default]
    Default,
}

impl ScoringPolicy {
    /// Resolve a policy name, falling back to the default for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "default" => Self::Default,
            other => {
                tracing::debug!(policy = %other, "unknown scoring policy, using default");
                Self::Default
            }
        }
    }

    /// Compute the quality score for a track whose lyric marker has
    /// already been derived. Missing fields contribute 0.
    pub fn score(&self, track: &Track) -> u32 {
        match self {
            Self::Default => {
                let mut score = 0;
                if !track.singers.is_empty() {
                    score += 1;
                }
                if track.album.as_deref().is_some_and(|album| !album.is_empty()) {
                    score += 1;
                }
                if track.has_lyric == LyricFlag::Available {
                    score += 1;
                }
                if track.ext.as_deref() == Some("flac") {
                    score += FLAC_BONUS;
                }
                score
            }
        }
    }
}

/// Derive the lyric-availability marker for a track.
///
/// Lyric-available iff the lyric text's character count strictly exceeds
/// the placeholder threshold (51+ characters qualifies).
pub fn derive_lyric_flag(track: &Track) -> LyricFlag {
    match track.lyric.as_deref() {
        Some(lyric) if lyric.chars().count() > LYRIC_PLACEHOLDER_MAX => LyricFlag::Available,
        _ => LyricFlag::Missing,
    }
}

/// Apply normalization to a flattened result sequence.
///
/// Returns the same tracks with `has_lyric` and `score` derived under
/// `policy`; no other field is mutated, and no track is added or dropped.
pub fn normalize_tracks(mut tracks: Vec<Track>, policy: ScoringPolicy) -> Vec<Track> {
    for track in &mut tracks {
        track.has_lyric = derive_lyric_flag(track);
        track.score = policy.score(track);
    }
    tracks
}
