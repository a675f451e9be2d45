//! Search configuration with sensible defaults.
//!
//! [`HuntConfig`] controls which sources are queried, the relevance
//! threshold, display cap, timeouts and request behaviour. Nothing here is
//! read from disk or the environment; callers build it explicitly.

use std::collections::HashMap;

use url::Url;

use crate::error::SearchError;
use crate::types::SourceKind;

/// Minimum score a candidate needs to be reported.
pub const DEFAULT_THRESHOLD: u8 = 40;

/// Configuration for one lookup run.
///
/// Use [`Default::default()`] for the stock behaviour, or construct with
/// field overrides.
#[derive(Debug, Clone)]
pub struct HuntConfig {
    /// Which sources to query. Reports come back in this order.
    pub sources: Vec<SourceKind>,
    /// Candidates scoring below this are dropped before ranking.
    pub threshold: u8,
    /// How many candidates per source a renderer should show.
    pub max_display: usize,
    /// Per-source connect and read-stall timeout in seconds.
    pub timeout_seconds: u64,
    /// Query all sources at once instead of one after another.
    pub concurrent: bool,
    /// Collapse candidates sharing a link within one source.
    pub dedupe_links: bool,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of browser User-Agents.
    pub user_agent: Option<String>,
    /// Per-source endpoint overrides, replacing [`SourceKind::default_endpoint`].
    pub endpoints: HashMap<SourceKind, String>,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            sources: SourceKind::all().to_vec(),
            threshold: DEFAULT_THRESHOLD,
            max_display: 10,
            timeout_seconds: 10,
            concurrent: false,
            dedupe_links: false,
            user_agent: None,
            endpoints: HashMap::new(),
        }
    }
}

impl HuntConfig {
    /// Point `source` at `endpoint` instead of its public URL.
    pub fn with_endpoint(mut self, source: SourceKind, endpoint: impl Into<String>) -> Self {
        self.endpoints.insert(source, endpoint.into());
        self
    }

    /// The endpoint to fetch for `source`, honouring overrides.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the endpoint is not an absolute URL.
    pub fn endpoint(&self, source: SourceKind) -> Result<Url, SearchError> {
        let raw = self
            .endpoints
            .get(&source)
            .map(String::as_str)
            .unwrap_or_else(|| source.default_endpoint());
        Url::parse(raw)
            .map_err(|e| SearchError::Config(format!("invalid endpoint for {source}: {e}")))
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `threshold` must be <= 100
    /// - `max_display` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `sources` must not be empty
    /// - every endpoint override must be an absolute URL
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.threshold > 100 {
            return Err(SearchError::Config("threshold must be <= 100".into()));
        }
        if self.max_display == 0 {
            return Err(SearchError::Config(
                "max_display must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.sources.is_empty() {
            return Err(SearchError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        for source in self.endpoints.keys() {
            self.endpoint(*source)?;
        }
        Ok(())
    }
}
