//! Shared HTTP client for source requests.
//!
//! One [`reqwest::Client`] is built per lookup run and reused by every
//! source. It carries the per-request timeout and a browser-like
//! User-Agent, since several sources serve bots an empty page.

use crate::config::HuntConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Browser User-Agent strings, one picked per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:140.0) Gecko/20100101 Firefox/140.0",
];

/// Build a [`reqwest::Client`] for fetching source pages.
///
/// The client has:
/// - Connect and read timeouts from config: a request fails only when the
///   connection stalls, so a large body that keeps arriving is never cut off
/// - Random User-Agent from the built-in list (or custom if configured)
/// - At most 10 redirects
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &HuntConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .connect_timeout(Duration::from_secs(config.timeout_seconds))
        .read_timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is non-empty, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}
