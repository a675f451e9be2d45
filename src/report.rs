//! Report rendering: a labelled section per source, as text or JSON.
//!
//! A source with no candidates and a source that failed render the same
//! "no matches" line in text mode. The failure reason is logged once by the
//! search driver, and is kept in JSON output.

use std::io::{self, Write};

use blue_search::{Candidate, HuntConfig, Query, SourceKind, SourceReport};
use serde::Serialize;

/// Write the human-readable report for `reports` to `out`.
pub fn render_text(
    out: &mut impl Write,
    query: &Query,
    config: &HuntConfig,
    reports: &[SourceReport],
) -> io::Result<()> {
    writeln!(
        out,
        "Searching for partial matches of: '{query}' (threshold={})",
        config.threshold
    )?;
    for report in reports {
        writeln!(out)?;
        render_section(out, report, config.max_display)?;
    }
    Ok(())
}

/// Write one source's section.
pub fn render_section(
    out: &mut impl Write,
    report: &SourceReport,
    max_display: usize,
) -> io::Result<()> {
    writeln!(out, "{}", report.source.label())?;
    match &report.outcome {
        Ok(candidates) if candidates.first().is_some_and(|best| best.score > 0) => {
            for candidate in candidates.iter().take(max_display) {
                writeln!(out, "   [score={}] {}", candidate.score, candidate.link)?;
            }
        }
        // Failures were already logged when the source was queried.
        Ok(_) | Err(_) => {
            writeln!(out, "   {}", report.source.no_matches_message())?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    query: &'a str,
    threshold: u8,
    sources: Vec<JsonSource<'a>>,
}

#[derive(Serialize)]
struct JsonSource<'a> {
    source: SourceKind,
    name: &'static str,
    #[serde(flatten)]
    outcome: JsonOutcome<'a>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum JsonOutcome<'a> {
    Ok { candidates: &'a [Candidate] },
    Error { reason: String },
}

/// Write `reports` as a single JSON document followed by a newline.
pub fn render_json(
    out: &mut impl Write,
    query: &Query,
    config: &HuntConfig,
    reports: &[SourceReport],
) -> io::Result<()> {
    let document = JsonReport {
        query: query.as_str(),
        threshold: config.threshold,
        sources: reports
            .iter()
            .map(|report| JsonSource {
                source: report.source,
                name: report.source.name(),
                outcome: match &report.outcome {
                    Ok(_) => JsonOutcome::Ok {
                        candidates: report.top(config.max_display),
                    },
                    Err(err) => JsonOutcome::Error {
                        reason: err.to_string(),
                    },
                },
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blue_search::SearchError;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn query() -> Query {
        Query::new("phishing").expect("valid query")
    }

    fn text(reports: &[SourceReport], config: &HuntConfig) -> String {
        let mut out = Vec::new();
        render_text(&mut out, &query(), config, reports).expect("write to vec");
        String::from_utf8(out).expect("utf8")
    }

    fn section(report: &SourceReport) -> String {
        let mut out = Vec::new();
        render_section(&mut out, report, 10).expect("write to vec");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn header_names_query_and_threshold() {
        let rendered = text(&[], &HuntConfig::default());
        assert_eq!(
            rendered,
            "Searching for partial matches of: 'phishing' (threshold=40)\n"
        );
    }

    #[test]
    fn candidates_listed_with_scores() {
        let report = SourceReport::new(
            SourceKind::Mitre,
            Ok(vec![
                Candidate::new(100, "https://attack.mitre.org/techniques/T1566"),
                Candidate::new(100, "https://attack.mitre.org/techniques/T1566/001"),
            ]),
        );
        assert_eq!(
            section(&report),
            "MITRE ATT&CK Results:\n\
             \x20  [score=100] https://attack.mitre.org/techniques/T1566\n\
             \x20  [score=100] https://attack.mitre.org/techniques/T1566/001\n"
        );
    }

    #[test]
    fn listing_capped_at_max_display() {
        let candidates = (0..25)
            .map(|i| Candidate::new(90, format!("https://wazuh.com/blog/{i}/")))
            .collect();
        let report = SourceReport::new(SourceKind::Wazuh, Ok(candidates));
        let config = HuntConfig {
            max_display: 10,
            ..Default::default()
        };
        let rendered = text(&[report], &config);
        assert_eq!(rendered.matches("[score=").count(), 10);
    }

    #[test]
    fn failure_renders_like_no_matches() {
        let empty = SourceReport::new(SourceKind::Reddit, Ok(vec![]));
        let failed = SourceReport::new(
            SourceKind::Reddit,
            Err(SearchError::Status {
                source_name: "Reddit".into(),
                status: 500,
            }),
        );
        assert_eq!(section(&empty), section(&failed));
        assert_eq!(
            section(&failed),
            "Reddit (/r/netsec) Results:\n   No relevant Reddit posts found or none met threshold.\n"
        );
    }

    #[test]
    fn all_zero_scores_render_as_no_matches() {
        let report = SourceReport::new(
            SourceKind::Sh3ll,
            Ok(vec![Candidate::new(0, "https://sh3ll.cloud/xf2/")]),
        );
        assert!(section(&report).contains("No relevant Sh3ll results found"));
    }

    #[test]
    fn sections_separated_by_blank_line() {
        let reports = vec![
            SourceReport::new(SourceKind::Elastic, Ok(vec![])),
            SourceReport::new(SourceKind::Medium, Ok(vec![])),
        ];
        let rendered = text(&reports, &HuntConfig::default());
        assert!(rendered.contains("(threshold=40)\n\nElastic Security Docs:\n"));
        assert!(rendered.contains("or none met threshold.\n\nMedium Articles:\n"));
    }

    #[test]
    fn json_distinguishes_failure_from_empty() {
        let reports = vec![
            SourceReport::new(
                SourceKind::Mitre,
                Ok(vec![Candidate::new(100, "https://attack.mitre.org/techniques/T1566")]),
            ),
            SourceReport::new(SourceKind::Medium, Ok(vec![])),
            SourceReport::new(
                SourceKind::Wazuh,
                Err(SearchError::Http("connection refused".into())),
            ),
        ];
        let mut out = Vec::new();
        render_json(&mut out, &query(), &HuntConfig::default(), &reports).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");

        assert_eq!(value["query"], "phishing");
        assert_eq!(value["threshold"], 40);
        assert_eq!(value["sources"][0]["source"], "mitre");
        assert_eq!(value["sources"][0]["status"], "ok");
        assert_eq!(value["sources"][0]["candidates"][0]["score"], 100);
        assert_eq!(value["sources"][1]["status"], "ok");
        assert_eq!(value["sources"][1]["candidates"].as_array().map(Vec::len), Some(0));
        assert_eq!(value["sources"][2]["status"], "error");
        assert_eq!(value["sources"][2]["reason"], "HTTP error: connection refused");
    }

    #[test]
    fn rendering_a_failure_does_not_log_it_again() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let failed = SourceReport::new(
            SourceKind::Wazuh,
            Err(SearchError::Timeout("Wazuh blog: operation timed out".into())),
        );
        let rendered = tracing::subscriber::with_default(subscriber, || section(&failed));

        assert!(rendered.contains("No relevant Wazuh blog results found"));
        let logged = logs.0.lock().expect("log buffer").clone();
        assert!(logged.is_empty(), "unexpected log output: {}", String::from_utf8_lossy(&logged));
    }
}
