//! CLI binary for blue-engine.

use blue_engine::cli::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so the report on stdout stays clean.
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blue_engine=info,blue_search=info")),
        )
        .init();

    let cli = Cli::parse();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    blue_engine::run(&cli, stdin.lock(), std::io::stderr(), &mut out)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "lookup failed");
            e
        })
}
