//! Lookup driver: run every configured source and collect their reports.
//!
//! Sources are independent. By default they run one after another; with
//! [`HuntConfig::concurrent`] they are fanned out together with
//! [`futures::future::join_all`]. Either way the reports come back in
//! configuration order, and a failing source never affects the others.

use crate::config::HuntConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::Source;
use crate::sources::build_source;
use crate::types::{Query, SourceReport};

use super::pipeline::run_source;

/// Query every source in `config.sources` for `query`.
///
/// # Pipeline
///
/// 1. Build one shared HTTP client
/// 2. Instantiate each source with its effective endpoint
/// 3. Run each source through [`run_source`], sequentially or concurrently
/// 4. Log per-source failures at warn level; keep them in the report
///
/// # Errors
///
/// Only setup can fail ([`SearchError::Config`] for a bad endpoint,
/// [`SearchError::Http`] if the client cannot be built). Per-source
/// failures are carried inside each [`SourceReport`].
pub async fn orchestrate_hunt(
    query: &Query,
    config: &HuntConfig,
) -> Result<Vec<SourceReport>, SearchError> {
    let client = http::build_client(config)?;
    let sources = config
        .sources
        .iter()
        .map(|kind| build_source(*kind, config))
        .collect::<Result<Vec<_>, _>>()?;

    let reports = if config.concurrent {
        let futures = sources
            .iter()
            .map(|source| query_one(source.as_ref(), &client, query, config));
        futures::future::join_all(futures).await
    } else {
        let mut reports = Vec::with_capacity(sources.len());
        for source in &sources {
            reports.push(query_one(source.as_ref(), &client, query, config).await);
        }
        reports
    };

    Ok(reports)
}

/// Run one source and wrap its outcome, logging failures.
async fn query_one(
    source: &dyn Source,
    client: &reqwest::Client,
    query: &Query,
    config: &HuntConfig,
) -> SourceReport {
    let kind = source.kind();
    let outcome = run_source(source, client, query, config).await;
    match &outcome {
        Ok(candidates) => {
            tracing::debug!(source = %kind, count = candidates.len(), "source returned candidates");
        }
        Err(err) => {
            tracing::warn!(source = %kind, error = %err, "source query failed");
        }
    }
    SourceReport::new(kind, outcome)
}
