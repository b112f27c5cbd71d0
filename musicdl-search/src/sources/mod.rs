//! Music source backend implementations.
//!
//! Each module provides a struct implementing [`crate::source::SourceBackend`]
//! that queries a specific provider's public search API and maps its JSON
//! payload onto [`crate::types::Track`] records.

pub mod kugou;
pub mod kuwo;
pub mod migu;
pub mod netease;
pub mod qqmusic;

pub use kugou::KugouBackend;
pub use kuwo::KuwoBackend;
pub use migu::MiguBackend;
pub use netease::NeteaseBackend;
pub use qqmusic::QqMusicBackend;

/// Format a byte count as the human-readable size shown in results, e.g. `3.81MB`.
pub(crate) fn format_size(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Format a duration in seconds as `mm:ss`.
pub(crate) fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Split a provider's joined artist string on `sep`, dropping empty names.
pub(crate) fn split_names(raw: &str, sep: char) -> Vec<String> {
    raw.split(sep)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
