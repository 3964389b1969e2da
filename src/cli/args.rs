//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "x509tojson")]
#[command(version)]
#[command(
    about = "Convert X.509 certificates from PEM or CSV files into JSON",
    long_about = "Reads certificates from PEM bundles (or base64 DER in a CSV column) and \
                  writes one JSON document per certificate to stdout, or POSTs each one to \
                  a search index."
)]
pub struct Cli {
    /// Input files, processed in order
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Data is in CSV format
    #[arg(long)]
    pub csv: bool,

    /// CSV column holding base64 DER (0 is first) [default: 1]
    #[arg(long, value_name = "N")]
    pub column: Option<usize>,

    /// Send the data to the search index instead of stdout
    #[arg(long)]
    pub es: bool,

    /// URL of the search index and type to POST to
    /// [default: http://localhost:9200/ct/certificates/]
    #[arg(long, value_name = "URL")]
    pub esurl: Option<String>,

    /// TOML settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default log filter when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
