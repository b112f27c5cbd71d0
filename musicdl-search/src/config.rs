//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] carries the values the CLI assembles from its options:
//! log file path, proxy map, save directory, per-source result cap, and
//! the selected scoring policy name.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::SearchError;

/// Configuration for a music search operation.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Path of the log file the CLI writes diagnostics to.
    pub logfilepath: PathBuf,
    /// Proxy map applied to provider requests: scheme (`http`, `https`,
    /// or `all`) to proxy URL. Empty means direct connections.
    pub proxies: HashMap<String, String>,
    /// Directory downloads would be saved under. Carried for client
    /// construction; nothing is written during search.
    pub savedir: PathBuf,
    /// Maximum number of results requested from each source.
    pub search_size_per_source: usize,
    /// Name of the scoring policy ranking the aggregated results.
    /// Unrecognised names fall back to the default policy.
    pub algorithm: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            logfilepath: PathBuf::from("musicdl.log"),
            proxies: HashMap::new(),
            savedir: PathBuf::from("music"),
            search_size_per_source: 5,
            algorithm: "default".into(),
            timeout_seconds: 10,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `search_size_per_source` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.search_size_per_source == 0 {
            return Err(SearchError::Config(
                "search_size_per_source must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.logfilepath, PathBuf::from("musicdl.log"));
        assert!(config.proxies.is_empty());
        assert_eq!(config.savedir, PathBuf::from("music"));
        assert_eq!(config.search_size_per_source, 5);
        assert_eq!(config.algorithm, "default");
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn valid_config_passes_validation() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_result_cap_rejected() {
        let config = SearchConfig {
            search_size_per_source: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("search_size_per_source"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn proxy_map_carried_verbatim() {
        let mut proxies = HashMap::new();
        proxies.insert("http".to_string(), "http://127.0.0.1:8080".to_string());
        let config = SearchConfig {
            proxies,
            ..Default::default()
        };
        assert_eq!(
            config.proxies.get("http").map(String::as_str),
            Some("http://127.0.0.1:8080")
        );
        assert!(config.validate().is_ok());
    }
}
