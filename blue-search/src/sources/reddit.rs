//! Reddit `/r/netsec` search.
//!
//! Uses the subreddit's own search page restricted to the subreddit. Post
//! links are root-relative (`/r/netsec/comments/...`) and are scored on
//! their visible title only.

use url::Url;

use crate::error::SearchError;
use crate::orchestrator::url_resolve::origin_of;
use crate::source::{selector, visible_text, Document, Fragment, Source};
use crate::types::{Query, SourceKind};

/// Selects links to posts in the subreddit.
const POST_SELECTOR: &str = "a[href^='/r/netsec/comments/']";

/// Reddit `/r/netsec` search scraper.
pub struct RedditSource {
    endpoint: Url,
}

impl RedditSource {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }
}

impl Source for RedditSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Reddit
    }

    fn request_url(&self, query: &Query) -> Result<Url, SearchError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query.as_str())
            .append_pair("restrict_sr", "1");
        Ok(url)
    }

    fn extract(&self, document: &Document) -> Result<Vec<Fragment>, SearchError> {
        let html = document.as_html()?;
        let posts = selector(POST_SELECTOR)?;
        let origin = origin_of(&self.endpoint);

        Ok(html
            .select(&posts)
            .map(|post| {
                let href = post.value().attr("href").unwrap_or_default();
                Fragment::new(
                    format!("{origin}{href}"),
                    vec![visible_text(post).to_lowercase()],
                )
            })
            .collect())
    }
}
