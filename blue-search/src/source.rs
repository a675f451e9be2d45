//! Trait definition for pluggable lookup sources.
//!
//! Each source (ATT&CK bundle, Reddit, Medium, the blog indexes) implements
//! [`Source`] to describe *what* to fetch and *how* to pull candidate links
//! out of the response. Fetching, scoring and ranking live in
//! [`crate::orchestrator::pipeline`] and are shared by all of them.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::SearchError;
use crate::types::{Query, SourceKind};

/// How a source's response body is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// A JSON document.
    Json,
    /// An HTML page.
    Html,
}

impl ResponseFormat {
    /// Parse `body` according to this format.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if a JSON body is malformed. HTML
    /// parsing is lenient and never fails.
    pub fn parse(self, body: &str) -> Result<Document, SearchError> {
        match self {
            Self::Json => serde_json::from_str(body)
                .map(Document::Json)
                .map_err(|e| SearchError::Parse(format!("invalid JSON body: {e}"))),
            Self::Html => Ok(Document::Html(Html::parse_document(body))),
        }
    }
}

/// A parsed response body.
pub enum Document {
    Json(serde_json::Value),
    Html(Html),
}

impl Document {
    /// Borrow the HTML tree, failing if the body was parsed as JSON.
    pub fn as_html(&self) -> Result<&Html, SearchError> {
        match self {
            Self::Html(html) => Ok(html),
            Self::Json(_) => Err(SearchError::Parse("expected an HTML document".into())),
        }
    }

    /// Borrow the JSON value, failing if the body was parsed as HTML.
    pub fn as_json(&self) -> Result<&serde_json::Value, SearchError> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Html(_) => Err(SearchError::Parse("expected a JSON document".into())),
        }
    }
}

/// One extracted link together with every text it may be scored against.
///
/// The fragment's score is the best score over `texts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Absolute URL reported if the fragment survives the threshold.
    pub link: String,
    /// Lowercased texts (visible text, raw href, ...) to match the query against.
    pub texts: Vec<String>,
}

impl Fragment {
    pub fn new(link: impl Into<String>, texts: Vec<String>) -> Self {
        Self {
            link: link.into(),
            texts,
        }
    }
}

/// A lookup source.
///
/// Implementors only describe the request and the extraction step:
///
/// - URL construction with query escaping
/// - which [`ResponseFormat`] the body uses
/// - turning the parsed [`Document`] into [`Fragment`]s
///
/// All implementations must be `Send + Sync` so that sources can be queried
/// concurrently.
pub trait Source: Send + Sync {
    /// Which [`SourceKind`] this implementation represents.
    fn kind(&self) -> SourceKind;

    /// Build the URL to fetch for `query`.
    fn request_url(&self, query: &Query) -> Result<Url, SearchError>;

    /// Response parsing strategy. Most sources serve HTML.
    fn format(&self) -> ResponseFormat {
        ResponseFormat::Html
    }

    /// Extract candidate fragments from the parsed response.
    fn extract(&self, document: &Document) -> Result<Vec<Fragment>, SearchError>;
}

/// Compile a CSS selector, mapping failures to [`SearchError::Parse`].
pub(crate) fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("invalid selector {css:?}: {e:?}")))
}

/// Visible text of an element: every text node trimmed, blanks dropped,
/// the rest concatenated.
pub(crate) fn visible_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
