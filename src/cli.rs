//! Command-line arguments and query input.

use std::io::{BufRead, Write};

use anyhow::Context;
use blue_search::{HuntConfig, Query, SourceKind, DEFAULT_THRESHOLD};
use clap::Parser;

/// Prompt shown when the query is read interactively.
pub const PROMPT: &str = "Enter a cybersecurity technique: ";

/// Blue Engine: look a cybersecurity technique up across ATT&CK, forums,
/// docs and security blogs.
#[derive(Debug, Parser)]
#[command(name = "blue-engine", version, about)]
pub struct Cli {
    /// Technique to look up. Prompted for on stdin when omitted.
    pub query: Vec<String>,

    /// Minimum fuzzy score (0-100) for a result to be reported.
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD,
          value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: u8,

    /// Results shown per source.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub max_results: usize,

    /// Per-source request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Only query these sources (repeatable): mitre, reddit, elastic,
    /// medium, iredteam (or ired), wazuh, rootx, sh3ll.
    #[arg(short, long = "source", value_name = "SOURCE")]
    pub sources: Vec<SourceKind>,

    /// Fetch a source from another URL, e.g. `mitre=http://mirror/attack.json`.
    #[arg(long = "endpoint", value_name = "SOURCE=URL", value_parser = parse_endpoint)]
    pub endpoints: Vec<(SourceKind, String)>,

    /// Query all sources at once instead of one after another.
    #[arg(long)]
    pub concurrent: bool,

    /// Show each link at most once per source.
    #[arg(long)]
    pub dedupe: bool,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Send this User-Agent instead of a rotating browser one.
    #[arg(long)]
    pub user_agent: Option<String>,
}

impl Cli {
    /// Build the lookup configuration from the parsed flags.
    pub fn to_config(&self) -> HuntConfig {
        let mut config = HuntConfig {
            threshold: self.threshold,
            max_display: self.max_results,
            timeout_seconds: self.timeout,
            concurrent: self.concurrent,
            dedupe_links: self.dedupe,
            user_agent: self.user_agent.clone(),
            ..Default::default()
        };
        if !self.sources.is_empty() {
            // Report order stays canonical whatever order flags were given in.
            config.sources = SourceKind::all()
                .iter()
                .copied()
                .filter(|kind| self.sources.contains(kind))
                .collect();
        }
        for (kind, url) in &self.endpoints {
            config = config.with_endpoint(*kind, url.clone());
        }
        config
    }

    /// The query given on the command line, if any.
    pub fn inline_query(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| self.query.join(" "))
    }
}

fn parse_endpoint(raw: &str) -> Result<(SourceKind, String), String> {
    let (kind, url) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SOURCE=URL, got {raw:?}"))?;
    let kind = kind.parse::<SourceKind>().map_err(|e| e.to_string())?;
    Ok((kind, url.trim().to_string()))
}

/// Prompt on `prompt` and read one line from `input` as the query.
///
/// # Errors
///
/// Fails if stdin cannot be read, is already at end of input, or the line
/// is blank.
pub fn read_query(mut input: impl BufRead, mut prompt: impl Write) -> anyhow::Result<Query> {
    prompt.write_all(PROMPT.as_bytes())?;
    prompt.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read query from stdin")?;
    if read == 0 {
        anyhow::bail!("no query given: stdin is closed");
    }
    Ok(Query::new(&line)?)
}
