//! CSV reading
//!
//! Each line holds comma-separated fields, one of which is a base64 DER
//! certificate. No quoting rules apply; commas always separate fields. Lines
//! are handled as raw bytes, so only the selected field has to be base64.

use crate::models::{BlobOrigin, RawBlob};
use crate::utils::SourceError;
use base64::Engine;
use std::io::BufRead;

/// Lazy iterator over the certificate blobs of one CSV file
pub struct CsvBlobs<R: BufRead> {
    path: String,
    reader: R,
    buf: Vec<u8>,
    column: usize,
    line_number: usize,
}

impl<R: BufRead> CsvBlobs<R> {
    pub fn new(reader: R, path: impl Into<String>, column: usize) -> Self {
        Self {
            path: path.into(),
            reader,
            buf: Vec::new(),
            column,
            line_number: 0,
        }
    }

    fn decode_line(&self, line: &[u8]) -> Result<RawBlob, SourceError> {
        let fields: Vec<&[u8]> = line.split(|&b| b == b',').collect();
        let Some(field) = fields.get(self.column) else {
            return Err(SourceError::MalformedLine {
                path: self.path.clone(),
                line: self.line_number,
                column: self.column,
                fields: fields
                    .iter()
                    .map(|f| String::from_utf8_lossy(f).into_owned())
                    .collect(),
            });
        };

        let der = base64::engine::general_purpose::STANDARD
            .decode(field)
            .map_err(|e| SourceError::MalformedBase64 {
                path: self.path.clone(),
                line: self.line_number,
                message: e.to_string(),
            })?;

        Ok(RawBlob::new(
            der,
            BlobOrigin::Csv {
                path: self.path.clone(),
                line: self.line_number,
            },
        ))
    }
}

impl<R: BufRead> Iterator for CsvBlobs<R> {
    type Item = Result<RawBlob, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        self.line_number += 1;

        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let line = trim_line_ending(&self.buf);
                Some(self.decode_line(line))
            }
            Err(e) => Some(Err(SourceError::FileReadError {
                path: self.path.clone(),
                message: format!("line {}: {}", self.line_number, e),
            })),
        }
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
