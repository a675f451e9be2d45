//! MITRE ATT&CK enterprise techniques, read from the public STIX bundle.
//!
//! The bundle is a single large JSON document. Only `attack-pattern`
//! objects carrying a `mitre-attack` external reference are considered;
//! each becomes one fragment scored on its name and description.

use serde::Deserialize;
use url::Url;

use crate::error::SearchError;
use crate::source::{Document, Fragment, ResponseFormat, Source};
use crate::types::{Query, SourceKind};

/// Where technique pages live on the ATT&CK website.
const TECHNIQUE_BASE: &str = "https://attack.mitre.org/techniques/";

#[derive(Debug, Deserialize)]
struct Bundle {
    objects: Vec<StixObject>,
}

#[derive(Debug, Deserialize)]
struct StixObject {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    external_references: Vec<ExternalReference>,
}

#[derive(Debug, Deserialize)]
struct ExternalReference {
    #[serde(default)]
    source_name: Option<String>,
    #[serde(default)]
    external_id: Option<String>,
}

impl StixObject {
    /// The ATT&CK technique id, taken from the first `mitre-attack` reference.
    fn technique_id(&self) -> Option<&str> {
        self.external_references
            .iter()
            .find(|r| r.source_name.as_deref() == Some("mitre-attack"))
            .and_then(|r| r.external_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Turn a technique id into its path on the ATT&CK website.
///
/// Sub-techniques are published as `T1059/001`, not `T1059.001`, so the
/// first `.` becomes a `/`. This is an ATT&CK site convention only.
///
/// # Examples
///
/// ```
/// use blue_search::sources::mitre::technique_path;
///
/// assert_eq!(technique_path("T1059.001"), "T1059/001");
/// assert_eq!(technique_path("T1059"), "T1059");
/// ```
pub fn technique_path(technique_id: &str) -> String {
    technique_id.replacen('.', "/", 1)
}

/// ATT&CK enterprise bundle source.
pub struct MitreSource {
    endpoint: Url,
}

impl MitreSource {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }
}

impl Source for MitreSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Mitre
    }

    /// The bundle is fetched whole; the query is not part of the URL.
    fn request_url(&self, _query: &Query) -> Result<Url, SearchError> {
        Ok(self.endpoint.clone())
    }

    fn format(&self) -> ResponseFormat {
        ResponseFormat::Json
    }

    fn extract(&self, document: &Document) -> Result<Vec<Fragment>, SearchError> {
        parse_bundle(document.as_json()?)
    }
}

/// Extract technique fragments from a decoded STIX bundle.
fn parse_bundle(value: &serde_json::Value) -> Result<Vec<Fragment>, SearchError> {
    let bundle = Bundle::deserialize(value)
        .map_err(|e| SearchError::Parse(format!("unexpected ATT&CK bundle shape: {e}")))?;

    let fragments: Vec<Fragment> = bundle
        .objects
        .iter()
        .filter(|obj| obj.kind == "attack-pattern")
        .filter_map(|obj| {
            let id = obj.technique_id()?;
            let text = format!(
                "{} {}",
                obj.name.as_deref().unwrap_or_default(),
                obj.description.as_deref().unwrap_or_default()
            )
            .to_lowercase();
            Some(Fragment::new(
                format!("{TECHNIQUE_BASE}{}", technique_path(id)),
                vec![text],
            ))
        })
        .collect();

    tracing::debug!(
        objects = bundle.objects.len(),
        techniques = fragments.len(),
        "ATT&CK bundle parsed"
    );
    Ok(fragments)
}
