//! The per-source fetch → extract → score → rank pipeline.
//!
//! Every source runs through [`run_source`]: one GET, a status check, body
//! parsing according to the source's [`ResponseFormat`](crate::source::ResponseFormat),
//! source-specific extraction, then the shared scoring and ranking.

use crate::config::HuntConfig;
use crate::error::SearchError;
use crate::source::Source;
use crate::types::{Candidate, Query};

use super::dedup::deduplicate;
use super::scoring::rank;

/// Fetch `source` for `query` and return its ranked candidates.
///
/// # Errors
///
/// - [`SearchError::Timeout`] if the request exceeds the client timeout
/// - [`SearchError::Status`] on a non-2xx response
/// - [`SearchError::Http`] on any other transport failure
/// - [`SearchError::Parse`] if the body cannot be parsed or extracted
pub async fn run_source(
    source: &dyn Source,
    client: &reqwest::Client,
    query: &Query,
    config: &HuntConfig,
) -> Result<Vec<Candidate>, SearchError> {
    let name = source.kind().name();
    let url = source.request_url(query)?;
    tracing::trace!(source = name, %url, query = %query, "fetching source");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SearchError::from_transport(name, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Status {
            source_name: name.to_owned(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| SearchError::from_transport(name, e))?;

    tracing::trace!(source = name, bytes = body.len(), "source response received");

    rank_body(source, &body, query, config)
}

/// Parse, extract and rank an already-fetched response body.
///
/// Kept synchronous: the parsed HTML tree is not `Send` and must not live
/// across an await point.
pub fn rank_body(
    source: &dyn Source,
    body: &str,
    query: &Query,
    config: &HuntConfig,
) -> Result<Vec<Candidate>, SearchError> {
    let document = source.format().parse(body)?;
    let fragments = source.extract(&document)?;
    let extracted = fragments.len();

    let mut candidates = rank(query, fragments, config.threshold);
    if config.dedupe_links {
        candidates = deduplicate(candidates);
    }

    tracing::debug!(
        source = source.kind().name(),
        extracted,
        kept = candidates.len(),
        "source ranked"
    );
    Ok(candidates)
}
