//! Medium article search.
//!
//! Medium's search page renders article cards as anchors wrapping `h2`/`h3`
//! headings. Two passes are made: headings (scored on their text, linked
//! through the enclosing anchor) and then every anchor (scored on text and
//! href). Only absolute links into Medium itself are kept, so sign-in and
//! policy links drop out.

use scraper::ElementRef;
use url::Url;

use crate::error::SearchError;
use crate::orchestrator::url_resolve::origin_of;
use crate::source::{selector, visible_text, Document, Fragment, Source};
use crate::types::{Query, SourceKind};

/// Medium search scraper.
pub struct MediumSource {
    endpoint: Url,
}

impl MediumSource {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }

    /// Links must start with this to count as Medium articles.
    fn article_prefix(&self) -> String {
        format!("{}/", origin_of(&self.endpoint))
    }
}

/// The closest `<a>` ancestor of `element`, if any.
fn enclosing_anchor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "a")
}

impl Source for MediumSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Medium
    }

    fn request_url(&self, query: &Query) -> Result<Url, SearchError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("q", query.as_str());
        Ok(url)
    }

    fn extract(&self, document: &Document) -> Result<Vec<Fragment>, SearchError> {
        let html = document.as_html()?;
        let headings = selector("h2, h3")?;
        let anchors = selector("a")?;
        let prefix = self.article_prefix();

        let mut fragments = Vec::new();

        for heading in html.select(&headings) {
            let Some(href) = enclosing_anchor(heading).and_then(|a| a.value().attr("href")) else {
                continue;
            };
            if href.starts_with(&prefix) {
                fragments.push(Fragment::new(
                    href,
                    vec![visible_text(heading).to_lowercase()],
                ));
            }
        }

        for anchor in html.select(&anchors) {
            let href = anchor.value().attr("href").unwrap_or_default();
            if href.starts_with(&prefix) {
                fragments.push(Fragment::new(
                    href,
                    vec![visible_text(anchor).to_lowercase(), href.to_lowercase()],
                ));
            }
        }

        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HuntConfig;
    use crate::orchestrator::pipeline::rank_body;
    use crate::source::ResponseFormat;

    const FIXTURE_SEARCH_HTML: &str = include_str!("../../test-data/medium-search.html");
    const ARTICLE: &str =
        "https://medium.com/@redteamer/kerberoasting-from-zero-to-hero-5c2e1d9f0a11?source=search_post";

    fn source() -> MediumSource {
        MediumSource::new(Url::parse(SourceKind::Medium.default_endpoint()).expect("valid url"))
    }

    fn query(raw: &str) -> Query {
        Query::new(raw).expect("valid query")
    }

    #[test]
    fn request_url_carries_query() {
        let url = source().request_url(&query("DLL Sideloading")).expect("url");
        assert_eq!(url.as_str(), "https://medium.com/search?q=dll+sideloading");
    }

    #[test]
    fn headings_then_anchors_are_extracted() {
        let document = ResponseFormat::Html.parse(FIXTURE_SEARCH_HTML).expect("html");
        let fragments = source().extract(&document).expect("extract");

        // Two linked headings, then four absolute Medium anchors.
        assert_eq!(fragments.len(), 6);
        assert_eq!(fragments[0].link, ARTICLE);
        assert_eq!(fragments[0].texts, vec!["kerberoasting from zero to hero".to_string()]);
        assert_eq!(fragments[1].texts, vec!["threat hunting notes".to_string()]);
        assert_eq!(fragments[2].link, "https://medium.com/");
        assert_eq!(fragments[2].texts.len(), 2);
    }

    #[test]
    fn relative_and_foreign_links_are_ignored() {
        let document = ResponseFormat::Html.parse(FIXTURE_SEARCH_HTML).expect("html");
        let fragments = source().extract(&document).expect("extract");
        assert!(fragments.iter().all(|f| f.link.starts_with("https://medium.com/")));
        assert!(!fragments.iter().any(|f| f.link.contains("relative-link-ignored")));
        assert!(!fragments.iter().any(|f| f.link.contains("policy.medium.com")));
    }

    #[test]
    fn article_reported_per_matching_element() {
        let candidates = rank_body(
            &source(),
            FIXTURE_SEARCH_HTML,
            &query("kerberoasting"),
            &HuntConfig::default(),
        )
        .expect("rank");
        let hits: Vec<_> = candidates.iter().filter(|c| c.link == ARTICLE).collect();
        // Heading, title anchor and "Read more" anchor (matched on its href).
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|c| c.score == 100));
        assert_eq!(candidates[0].link, ARTICLE);
    }

    #[test]
    fn dedupe_collapses_repeated_article() {
        let config = HuntConfig {
            dedupe_links: true,
            ..Default::default()
        };
        let candidates = rank_body(&source(), FIXTURE_SEARCH_HTML, &query("kerberoasting"), &config)
            .expect("rank");
        assert_eq!(candidates.iter().filter(|c| c.link == ARTICLE).count(), 1);
    }
}
