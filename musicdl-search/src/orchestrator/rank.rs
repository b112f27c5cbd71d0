//! Stable descending ordering of normalized results.

use crate::types::Track;

/// Order tracks by score, highest first.
///
/// The sort is stable: tracks with equal scores keep their relative order
/// from the input sequence. That input order encodes source iteration
/// order followed by each source's original order, which must survive
/// ranking for reproducibility. Every input track appears exactly once in
/// the output — no filtering, no deduplication, no truncation.
pub fn rank(mut tracks: Vec<Track>) -> Vec<Track> {
    tracks.sort_by(|a, b| b.score.cmp(&a.score));
    tracks
}
