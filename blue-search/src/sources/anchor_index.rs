//! Single-page anchor index: Elastic docs, iRed.Team, Wazuh, Root X, Sh3ll.
//!
//! These sources have no usable search endpoint. Their landing page is
//! fetched as-is and every `<a>` on it becomes a fragment, scored on both
//! its visible text and its raw href (slugs often carry the technique name
//! when the link text is just "Read more").

use url::Url;

use crate::error::SearchError;
use crate::orchestrator::url_resolve::resolve_link;
use crate::source::{selector, visible_text, Document, Fragment, Source};
use crate::types::{Query, SourceKind};

/// Scores every anchor on one fixed page.
pub struct AnchorIndexSource {
    kind: SourceKind,
    endpoint: Url,
}

impl AnchorIndexSource {
    pub fn new(kind: SourceKind, endpoint: Url) -> Self {
        Self { kind, endpoint }
    }
}

impl Source for AnchorIndexSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    /// The index page does not depend on the query.
    fn request_url(&self, _query: &Query) -> Result<Url, SearchError> {
        Ok(self.endpoint.clone())
    }

    fn extract(&self, document: &Document) -> Result<Vec<Fragment>, SearchError> {
        let html = document.as_html()?;
        let anchors = selector("a")?;

        let mut fragments = Vec::new();
        for anchor in html.select(&anchors) {
            let href = anchor.value().attr("href").unwrap_or_default();
            let Some(link) = resolve_link(&self.endpoint, href) else {
                tracing::trace!(source = %self.kind, href, "unresolvable href skipped");
                continue;
            };
            fragments.push(Fragment::new(
                link,
                vec![visible_text(anchor).to_lowercase(), href.to_lowercase()],
            ));
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

    const FIXTURE_INDEX_HTML: &str = include_str!("../../test-data/blog-index.html");

    fn wazuh() -> AnchorIndexSource {
        AnchorIndexSource::new(
            SourceKind::Wazuh,
            Url::parse(SourceKind::Wazuh.default_endpoint()).expect("valid url"),
        )
    }

    fn query(raw: &str) -> Query {
        Query::new(raw).expect("valid query")
    }

    #[test]
    fn request_url_ignores_query() {
        let url = wazuh().request_url(&query("mimikatz")).expect("url");
        assert_eq!(url.as_str(), "https://wazuh.com/blog/");
    }

    #[test]
    fn kind_is_preserved() {
        for kind in [
            SourceKind::Elastic,
            SourceKind::IRedTeam,
            SourceKind::Wazuh,
            SourceKind::RootX,
            SourceKind::Sh3ll,
        ] {
            let source = AnchorIndexSource::new(
                kind,
                Url::parse(kind.default_endpoint()).expect("valid url"),
            );
            assert_eq!(source.kind(), kind);
        }
    }

    #[test]
    fn every_anchor_becomes_a_resolved_fragment() {
        let document = ResponseFormat::Html.parse(FIXTURE_INDEX_HTML).expect("html");
        let fragments = wazuh().extract(&document).expect("extract");
        let links: Vec<&str> = fragments.iter().map(|f| f.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://wazuh.com/",
                "https://wazuh.com/about/",
                "https://wazuh.com/blog/detecting-kerberoasting-attacks/",
                "https://wazuh.com/blog/monitoring-powershell-activity/",
                "https://wazuh.com/blog/mimikatz-detection/",
                "https://wazuh.com/blog/cloud-storage-auditing/",
                "https://wazuh.com/blog/",
            ]
        );
    }

    #[test]
    fn fragment_texts_are_visible_text_and_href() {
        let document = ResponseFormat::Html.parse(FIXTURE_INDEX_HTML).expect("html");
        let fragments = wazuh().extract(&document).expect("extract");
        assert_eq!(
            fragments[5].texts,
            vec![
                "cloudstorage auditing".to_string(),
                "/blog/cloud-storage-auditing/".to_string()
            ]
        );
        // An anchor without href scores against an empty string.
        assert_eq!(fragments[6].texts, vec!["subscribe".to_string(), String::new()]);
    }

    #[test]
    fn href_slug_match_surfaces_read_more_link() {
        let candidates = rank_body(
            &wazuh(),
            FIXTURE_INDEX_HTML,
            &query("Mimikatz"),
            &HuntConfig::default(),
        )
        .expect("rank");
        assert_eq!(candidates[0].link, "https://wazuh.com/blog/mimikatz-detection/");
        assert_eq!(candidates[0].score, 100);
    }

    #[test]
    fn results_sorted_and_above_threshold() {
        for raw in ["kerberoasting", "powershell", "cloud storage", "lateral movement"] {
            let candidates =
                rank_body(&wazuh(), FIXTURE_INDEX_HTML, &query(raw), &HuntConfig::default())
                    .expect("rank");
            assert!(candidates.iter().all(|c| (40..=100).contains(&c.score)));
            assert!(candidates.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn empty_page_yields_nothing() {
        let candidates = rank_body(
            &wazuh(),
            "<html><body></body></html>",
            &query("mimikatz"),
            &HuntConfig::default(),
        )
        .expect("rank");
        assert!(candidates.is_empty());
    }
}
