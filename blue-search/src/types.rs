//! Core types: queries, scored candidates, sources and per-source reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// A normalised user query: trimmed and lowercased, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Normalise `raw` into a query.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Query`] if `raw` is blank.
    pub fn new(raw: &str) -> Result<Self, SearchError> {
        let normalised = raw.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(SearchError::Query("query is empty".into()));
        }
        Ok(Self(normalised))
    }

    /// The normalised query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single scored match from one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Fuzzy partial-match score in `0..=100`.
    pub score: u8,
    /// Absolute URL of the matching page.
    pub link: String,
}

impl Candidate {
    pub fn new(score: u8, link: impl Into<String>) -> Self {
        Self {
            score,
            link: link.into(),
        }
    }
}

/// The eight sources blue-search knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// MITRE ATT&CK enterprise technique bundle (STIX JSON).
    Mitre,
    /// Search within the `/r/netsec` subreddit.
    Reddit,
    /// Elastic Security documentation index.
    Elastic,
    /// Medium article search.
    Medium,
    /// iRed.Team homepage.
    IRedTeam,
    /// Wazuh blog index.
    Wazuh,
    /// Root X blog (Arabic).
    RootX,
    /// Sh3ll forum (Arabic).
    Sh3ll,
}

impl SourceKind {
    /// Human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mitre => "MITRE ATT&CK",
            Self::Reddit => "Reddit",
            Self::Elastic => "Elastic Security Docs",
            Self::Medium => "Medium",
            Self::IRedTeam => "iRed.Team",
            Self::Wazuh => "Wazuh blog",
            Self::RootX => "Root X",
            Self::Sh3ll => "Sh3ll",
        }
    }

    /// Short identifier used on the command line and in JSON output.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Mitre => "mitre",
            Self::Reddit => "reddit",
            Self::Elastic => "elastic",
            Self::Medium => "medium",
            Self::IRedTeam => "iredteam",
            Self::Wazuh => "wazuh",
            Self::RootX => "rootx",
            Self::Sh3ll => "sh3ll",
        }
    }

    /// Section heading printed above this source's results.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mitre => "MITRE ATT&CK Results:",
            Self::Reddit => "Reddit (/r/netsec) Results:",
            Self::Elastic => "Elastic Security Docs:",
            Self::Medium => "Medium Articles:",
            Self::IRedTeam => "iRed.Team (Homepage) Results:",
            Self::Wazuh => "Wazuh Blog Results:",
            Self::RootX => "Root X Blog (Arabic) Results:",
            Self::Sh3ll => "Sh3ll (Arabic) Results:",
        }
    }

    /// Line printed when this source has nothing to show.
    pub fn no_matches_message(&self) -> &'static str {
        match self {
            Self::Mitre => "No MITRE matches found or none met threshold.",
            Self::Reddit => "No relevant Reddit posts found or none met threshold.",
            Self::Elastic => "No relevant Elastic Security docs found or none met threshold.",
            Self::Medium => "No relevant Medium articles found or none met threshold.",
            Self::IRedTeam => "No relevant iRed.Team results found or none met threshold.",
            Self::Wazuh => "No relevant Wazuh blog results found or none met threshold.",
            Self::RootX => "No relevant Root X blog results found or none met threshold.",
            Self::Sh3ll => "No relevant Sh3ll results found or none met threshold.",
        }
    }

    /// The endpoint queried when no override is configured.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::Mitre => {
                "https://raw.githubusercontent.com/mitre/cti/master/enterprise-attack/enterprise-attack.json"
            }
            Self::Reddit => "https://www.reddit.com/r/netsec/search/",
            Self::Elastic => "https://www.elastic.co/guide/en/security/current/",
            Self::Medium => "https://medium.com/search",
            Self::IRedTeam => "https://www.ired.team/",
            Self::Wazuh => "https://wazuh.com/blog/",
            Self::RootX => "https://root-x.dev/blog/",
            Self::Sh3ll => "https://sh3ll.cloud/xf2/",
        }
    }

    /// All sources, in report order.
    pub fn all() -> &'static [SourceKind] {
        &[
            Self::Mitre,
            Self::Reddit,
            Self::Elastic,
            Self::Medium,
            Self::IRedTeam,
            Self::Wazuh,
            Self::RootX,
            Self::Sh3ll,
        ]
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "ired" {
            return Ok(Self::IRedTeam);
        }
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| SearchError::Config(format!("unknown source: {s}")))
    }
}

/// The outcome of querying one source.
#[derive(Debug)]
pub struct SourceReport {
    /// Which source produced this report.
    pub source: SourceKind,
    /// Ranked candidates, or the reason the source could not be queried.
    pub outcome: Result<Vec<Candidate>, SearchError>,
}

impl SourceReport {
    pub fn new(source: SourceKind, outcome: Result<Vec<Candidate>, SearchError>) -> Self {
        Self { source, outcome }
    }

    /// The best `limit` candidates, or an empty slice if the source failed.
    pub fn top(&self, limit: usize) -> &[Candidate] {
        match &self.outcome {
            Ok(candidates) => &candidates[..candidates.len().min(limit)],
            Err(_) => &[],
        }
    }

    /// Whether the source failed to produce a result list.
    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed_and_lowercased() {
        let query = Query::new("  Pass The Hash \n").expect("valid query");
        assert_eq!(query.as_str(), "pass the hash");
        assert_eq!(query.to_string(), "pass the hash");
    }

    #[test]
    fn blank_query_rejected() {
        let err = Query::new("   \t").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn candidate_serializes_score_and_link() {
        let candidate = Candidate::new(87, "https://attack.mitre.org/techniques/T1566");
        let json = serde_json::to_value(&candidate).expect("serialize");
        assert_eq!(json["score"], 87);
        assert_eq!(json["link"], "https://attack.mitre.org/techniques/T1566");
    }

    #[test]
    fn source_kind_all_in_report_order() {
        let all = SourceKind::all();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], SourceKind::Mitre);
        assert_eq!(all[7], SourceKind::Sh3ll);
    }

    #[test]
    fn source_kind_parses_ids() {
        for kind in SourceKind::all() {
            let parsed: SourceKind = kind.id().parse().expect("id should parse");
            assert_eq!(parsed, *kind);
        }
        assert_eq!("IRED".parse::<SourceKind>().ok(), Some(SourceKind::IRedTeam));
        assert!("altavista".parse::<SourceKind>().is_err());
    }

    #[test]
    fn source_kind_serde_uses_id() {
        let json = serde_json::to_string(&SourceKind::RootX).expect("serialize");
        assert_eq!(json, "\"rootx\"");
        let decoded: SourceKind = serde_json::from_str("\"iredteam\"").expect("deserialize");
        assert_eq!(decoded, SourceKind::IRedTeam);
    }

    #[test]
    fn default_endpoints_are_absolute() {
        for kind in SourceKind::all() {
            let parsed = url::Url::parse(kind.default_endpoint());
            assert!(parsed.is_ok(), "{kind} endpoint is not absolute");
        }
    }

    #[test]
    fn report_top_truncates() {
        let candidates = (0..15)
            .map(|i| Candidate::new(100 - i, format!("https://example.org/{i}")))
            .collect();
        let report = SourceReport::new(SourceKind::Wazuh, Ok(candidates));
        assert_eq!(report.top(10).len(), 10);
        assert_eq!(report.top(10)[0].score, 100);
        assert!(!report.is_failure());
    }

    #[test]
    fn failed_report_has_no_candidates() {
        let report = SourceReport::new(
            SourceKind::Reddit,
            Err(SearchError::Http("connection refused".into())),
        );
        assert!(report.top(10).is_empty());
        assert!(report.is_failure());
    }
}
