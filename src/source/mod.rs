//! Input file reading
//!
//! Turns PEM bundles or CSV exports into a lazy sequence of DER blobs.
//! Anything structurally wrong with an input file is a [`SourceError`] and
//! ends the run.

pub mod csv;
pub mod pem;

pub use self::csv::CsvBlobs;
pub use self::pem::PemBlobs;

use crate::models::RawBlob;
use crate::utils::SourceError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Input container format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Pem,
    /// CSV with base64 DER in the given zero-based column
    Csv { column: usize },
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Pem => write!(f, "PEM"),
            InputFormat::Csv { column } => write!(f, "CSV (column {})", column),
        }
    }
}

/// Blob iterator over one input file, whichever its format
pub enum BlobSource {
    Pem(PemBlobs),
    Csv(CsvBlobs<BufReader<File>>),
}

impl Iterator for BlobSource {
    type Item = Result<RawBlob, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            BlobSource::Pem(blobs) => blobs.next(),
            BlobSource::Csv(blobs) => blobs.next(),
        }
    }
}

/// Open an input file for blob extraction
pub fn open(path: &Path, format: InputFormat) -> Result<BlobSource, SourceError> {
    let display = path.display().to_string();
    let read_error = |e: std::io::Error| SourceError::FileReadError {
        path: display.clone(),
        message: e.to_string(),
    };

    match format {
        InputFormat::Pem => {
            let data = std::fs::read(path).map_err(read_error)?;
            Ok(BlobSource::Pem(PemBlobs::new(data, display.clone())))
        }
        InputFormat::Csv { column } => {
            let file = File::open(path).map_err(read_error)?;
            Ok(BlobSource::Csv(CsvBlobs::new(
                BufReader::new(file),
                display.clone(),
                column,
            )))
        }
    }
}
