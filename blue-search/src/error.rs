//! Error types for the blue-search crate.
//!
//! Every per-source failure is surfaced as a [`SearchError`] value inside
//! that source's report. Messages are stable strings suitable for logs.

/// Errors that can occur while querying a source or preparing a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The source answered with a non-success status code.
    #[error("{source_name} returned status {status}")]
    Status {
        /// Display name of the source.
        source_name: String,
        /// HTTP status code received.
        status: u16,
    },

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The user query is unusable (e.g. blank).
    #[error("invalid query: {0}")]
    Query(String),
}

impl SearchError {
    /// Map a transport-level [`reqwest::Error`] for `source_name`.
    pub(crate) fn from_transport(source_name: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() || stalled(&err) {
            Self::Timeout(format!("{source_name}: {err}"))
        } else if let Some(status) = err.status() {
            Self::Status {
                source_name: source_name.to_owned(),
                status: status.as_u16(),
            }
        } else {
            Self::Http(format!("{source_name} request failed: {err}"))
        }
    }
}

/// Whether an I/O timeout (a stalled read) sits anywhere in `err`'s source chain.
fn stalled(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if inner
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::TimedOut)
        {
            return true;
        }
        source = inner.source();
    }
    false
}

/// Convenience type alias for blue-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
