//! # blue-search
//!
//! Fuzzy lookup of a cybersecurity technique across public sources: the
//! MITRE ATT&CK enterprise bundle, `/r/netsec`, the Elastic Security docs,
//! Medium, and a handful of security blogs.
//!
//! ## Design
//!
//! - Every source goes through the same pipeline: one GET, parse (JSON or
//!   HTML), extract candidate links with the texts they may match on,
//!   score each with a partial-substring fuzzy ratio, drop anything below
//!   the threshold, sort best first
//! - Sources only describe their URL, response format and extraction via
//!   the [`Source`] trait
//! - Sources are independent: a failing one is reported as an `Err` in its
//!   own [`SourceReport`] and never affects the rest
//! - No caching, retries, pagination or authentication
//!
//! Queries are logged only at trace level.

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod source;
pub mod sources;
pub mod types;

pub use config::{HuntConfig, DEFAULT_THRESHOLD};
pub use error::{Result, SearchError};
pub use source::{Document, Fragment, ResponseFormat, Source};
pub use types::{Candidate, Query, SourceKind, SourceReport};

/// Look `query` up in every source enabled in `config`.
///
/// Returns one [`SourceReport`] per source in `config.sources`, in that
/// order. Each report holds either the ranked candidates or the reason the
/// source failed.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Individual
/// source failures are not errors here; they are carried in the reports.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> blue_search::Result<()> {
/// let query = blue_search::Query::new("Kerberoasting")?;
/// let reports = blue_search::hunt(&query, &blue_search::HuntConfig::default()).await?;
/// for report in &reports {
///     for candidate in report.top(10) {
///         println!("{} [{}] {}", report.source, candidate.score, candidate.link);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub async fn hunt(query: &Query, config: &HuntConfig) -> Result<Vec<SourceReport>> {
    config.validate()?;
    orchestrator::search::orchestrate_hunt(query, config).await
}

/// Look `query` up with the default configuration.
///
/// Convenience wrapper around [`hunt`] using [`HuntConfig::default()`].
///
/// # Errors
///
/// Same as [`hunt`].
pub async fn hunt_default(query: &Query) -> Result<Vec<SourceReport>> {
    hunt(query, &HuntConfig::default()).await
}
