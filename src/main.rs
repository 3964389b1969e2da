//! x509tojson - convert X.509 certificates to JSON
//!
//! Reads PEM or CSV certificate batches and writes one JSON document per
//! certificate to stdout or to a search index.

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;
use x509tojson::{runner, Cli, Settings};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for data
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::from_cli(&cli)?;
    runner::run(&settings).await?;
    Ok(())
}
