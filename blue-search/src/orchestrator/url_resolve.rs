//! Link resolution and canonicalisation.
//!
//! Sources hand back hrefs exactly as they appear in the page. These
//! helpers turn them into absolute links, and produce a canonical form used
//! only as a dedup key.

use url::Url;

/// Query parameters that never change which page a link points at.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "source",
    "sk",
    "ref",
];

/// Resolve `href` against `base` using standard relative-URL rules.
///
/// An empty href resolves to `base` itself. Returns `None` if the href
/// cannot be resolved (e.g. a malformed absolute URL).
///
/// # Examples
///
/// ```
/// use blue_search::orchestrator::url_resolve::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.org/blog/").unwrap();
/// assert_eq!(resolve_link(&base, "/post/1").as_deref(), Some("https://example.org/post/1"));
/// ```
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(String::from)
}

/// Scheme, host and port of `url`, without a trailing slash
/// (`https://www.reddit.com`).
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Canonical form of a link for duplicate detection.
///
/// Drops the fragment, tracking parameters and a trailing path slash.
/// Unparseable input is returned unchanged.
pub fn canonical_link(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    parsed.set_fragment(None);

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept);
    }

    let path = parsed.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(&path[..path.len() - 1]);
    }

    parsed.to_string()
}
