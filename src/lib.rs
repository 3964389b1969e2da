//! x509tojson library
//!
//! Converts batches of X.509 certificates into JSON documents:
//! - Reads PEM bundles, or CSV files with a base64 DER column
//! - Decodes each certificate with x509-parser
//! - Writes newline-delimited JSON to stdout, or POSTs each document to a
//!   search index
//!
//! # Usage
//!
//! ```rust,ignore
//! use x509tojson::config::{OutputTarget, Settings};
//! use x509tojson::source::InputFormat;
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = Settings {
//!         files: vec!["bundle.pem".into()],
//!         input: InputFormat::Pem,
//!         output: OutputTarget::Stdout,
//!     };
//!     let summary = x509tojson::runner::run(&settings).await.unwrap();
//!     eprintln!("{} certificates converted", summary.emitted);
//! }
//! ```

pub mod certificate;
pub mod cli;
pub mod config;
pub mod models;
pub mod runner;
pub mod sink;
pub mod source;
pub mod utils;

// Re-export commonly used types
pub use certificate::CertificateDecoder;
pub use cli::Cli;
pub use config::Settings;
pub use models::{ConversionError, ParsedCertificate, RawBlob, RunSummary};
pub use utils::{ConvertError, Result};
