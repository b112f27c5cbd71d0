//! Shared HTTP client with User-Agent rotation for provider requests.
//!
//! Provides a configured [`reqwest::Client`] with browser-like headers,
//! cookie support, rotating User-Agent strings, and the proxy map from
//! the search configuration applied.

use crate::config::SearchConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use std::time::Duration;
use url::Url;

/// Realistic browser User-Agent strings, rotated per client build.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Build a [`reqwest::Client`] configured for provider API requests.
///
/// The client has:
/// - Cookie store enabled (some providers gate endpoints behind cookies)
/// - Timeout from config
/// - Random User-Agent from the built-in rotation list
/// - Gzip decompression
/// - The configured proxy map applied (`http`, `https`, or `all` keys)
///
/// # Errors
///
/// Returns [`SearchError::Config`] for a malformed proxy entry and
/// [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let mut builder = reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(random_user_agent())
        .redirect(reqwest::redirect::Policy::limited(10));

    for (scheme, target) in &config.proxies {
        builder = builder.proxy(build_proxy(scheme, target)?);
    }

    builder
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Construct a [`reqwest::Proxy`] from one proxy-map entry.
fn build_proxy(scheme: &str, target: &str) -> Result<reqwest::Proxy, SearchError> {
    Url::parse(target)
        .map_err(|e| SearchError::Config(format!("invalid proxy URL for '{scheme}': {e}")))?;

    let proxy = match scheme {
        "http" => reqwest::Proxy::http(target),
        "https" => reqwest::Proxy::https(target),
        "all" => reqwest::Proxy::all(target),
        other => {
            return Err(SearchError::Config(format!(
                "unsupported proxy scheme '{other}' (expected http, https, or all)"
            )))
        }
    };
    proxy.map_err(|e| SearchError::Config(format!("invalid proxy for '{scheme}': {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}
