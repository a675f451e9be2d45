//! Source implementations.
//!
//! Each module provides a struct implementing [`crate::source::Source`] for
//! one family of endpoints. The four blog indexes and the Elastic docs share
//! [`AnchorIndexSource`]: they are all "score every anchor on one page".

pub mod anchor_index;
pub mod medium;
pub mod mitre;
pub mod reddit;

pub use anchor_index::AnchorIndexSource;
pub use medium::MediumSource;
pub use mitre::MitreSource;
pub use reddit::RedditSource;

use crate::config::HuntConfig;
use crate::error::SearchError;
use crate::source::Source;
use crate::types::SourceKind;

/// Instantiate the implementation for `kind` at its configured endpoint.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the endpoint is not an absolute URL.
pub fn build_source(kind: SourceKind, config: &HuntConfig) -> Result<Box<dyn Source>, SearchError> {
    let endpoint = config.endpoint(kind)?;
    Ok(match kind {
        SourceKind::Mitre => Box::new(MitreSource::new(endpoint)),
        SourceKind::Reddit => Box::new(RedditSource::new(endpoint)),
        SourceKind::Medium => Box::new(MediumSource::new(endpoint)),
        SourceKind::Elastic
        | SourceKind::IRedTeam
        | SourceKind::Wazuh
        | SourceKind::RootX
        | SourceKind::Sh3ll => Box::new(AnchorIndexSource::new(kind, endpoint)),
    })
}
