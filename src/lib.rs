//! Blue Engine: look a cybersecurity technique up across public sources.
//!
//! The heavy lifting (fetching, fuzzy scoring, ranking) lives in the
//! `blue-search` crate. This crate wires it to the terminal:
//!
//! - [`cli`]: flags and interactive query input
//! - [`report`]: text and JSON rendering of per-source results
//! - [`run`]: the end-to-end driver used by the binary

pub mod cli;
pub mod report;

use std::io::{BufRead, Write};

use cli::Cli;

/// Run one lookup: resolve the query, query every source, render the report.
///
/// The query comes from the command line if given, otherwise it is prompted
/// for on `prompt` and read from `input`. The report is written to `out`.
///
/// # Errors
///
/// Fails on invalid configuration, a missing or blank query, or an I/O
/// error while writing. Individual source failures are not errors; they
/// render as "no matches".
pub async fn run(
    cli: &Cli,
    input: impl BufRead,
    prompt: impl Write,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let config = cli.to_config();
    config.validate()?;

    let query = match cli.inline_query() {
        Some(raw) => blue_search::Query::new(&raw)?,
        None => cli::read_query(input, prompt)?,
    };
    tracing::debug!(sources = config.sources.len(), concurrent = config.concurrent, "starting lookup");

    let reports = blue_search::hunt(&query, &config).await?;

    let failed = reports.iter().filter(|r| r.is_failure()).count();
    if failed > 0 {
        tracing::info!(failed, total = reports.len(), "some sources could not be queried");
    }

    if cli.json {
        report::render_json(out, &query, &config, &reports)?;
    } else {
        report::render_text(out, &query, &config, &reports)?;
    }
    out.flush()?;
    Ok(())
}
