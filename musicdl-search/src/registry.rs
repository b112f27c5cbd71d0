//! Source registry: resolving a user-supplied selection into a working set.
//!
//! The registry does not validate membership — unknown identifiers are
//! passed through verbatim and it is the client's job to skip sources it
//! has no backend for.

use crate::types::MusicSource;

/// Resolve a source selection into the concrete working set.
///
/// An absent or empty selection yields the full builtin registry in
/// [`MusicSource::all()`] order. Otherwise the selection is split on
/// commas, each token is trimmed of surrounding whitespace, and the
/// resulting sequence is returned verbatim: no validation against the
/// registry, no deduplication.
pub fn resolve(selection: Option<&str>) -> Vec<String> {
    match selection {
        Some(list) if !list.is_empty() => list
            .split(',')
            .map(|token| token.trim().to_string())
            .collect(),
        _ => MusicSource::all()
            .iter()
            .map(|source| source.name().to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_selection_yields_full_registry() {
        let sources = resolve(None);
        assert_eq!(
            sources,
            vec!["kugou", "kuwo", "qqmusic", "netease", "migu"]
        );
    }

    #[test]
    fn empty_selection_yields_full_registry() {
        assert_eq!(resolve(Some("")), resolve(None));
    }

    #[test]
    fn explicit_selection_split_and_trimmed() {
        let sources = resolve(Some("kugou, netease ,migu"));
        assert_eq!(sources, vec!["kugou", "netease", "migu"]);
    }

    #[test]
    fn unknown_identifiers_pass_through() {
        let sources = resolve(Some("kugou,joox,definitely-not-a-source"));
        assert_eq!(sources, vec!["kugou", "joox", "definitely-not-a-source"]);
    }

    #[test]
    fn duplicates_preserved() {
        let sources = resolve(Some("kugou,kugou"));
        assert_eq!(sources, vec!["kugou", "kugou"]);
    }

    #[test]
    fn single_token_selection() {
        assert_eq!(resolve(Some("netease")), vec!["netease"]);
    }

    #[test]
    fn default_registry_is_non_empty() {
        assert!(!resolve(None).is_empty());
    }
}
