//! PEM bundle reading
//!
//! Walks a buffer of concatenated PEM blocks and yields the DER contents of
//! every header-less `CERTIFICATE` block. A block only starts at a
//! `-----BEGIN ` marker at the beginning of a line.

use crate::models::{BlobOrigin, RawBlob};
use crate::utils::SourceError;

const BEGIN_MARKER: &[u8] = b"-----BEGIN ";
const END_MARKER: &[u8] = b"-----END ";
const DASHES: &[u8] = b"-----";

/// Lazy iterator over the certificate blobs of one PEM file
pub struct PemBlobs {
    path: String,
    data: Vec<u8>,
    pos: usize,
    emitted: usize,
}

impl PemBlobs {
    pub fn new(data: Vec<u8>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            data,
            pos: 0,
            emitted: 0,
        }
    }
}

impl Iterator for PemBlobs {
    type Item = Result<RawBlob, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.pos + find(&self.data[self.pos..], BEGIN_MARKER)?;
            if start > 0 && self.data[start - 1] != b'\n' {
                self.pos = start + BEGIN_MARKER.len();
                continue;
            }
            let block = &self.data[start..];

            let parsed = match ::pem::parse(block) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::debug!("Skipping undecodable PEM block in {}: {}", self.path, e);
                    self.pos = start + BEGIN_MARKER.len();
                    continue;
                }
            };
            self.pos = start + block_len(block);

            if !is_plain_certificate(&parsed) {
                tracing::debug!(
                    "Skipping PEM block of type {:?} in {}",
                    parsed.tag(),
                    self.path
                );
                continue;
            }

            let origin = BlobOrigin::Pem {
                path: self.path.clone(),
                block: self.emitted,
            };
            self.emitted += 1;
            return Some(Ok(RawBlob::new(parsed.into_contents(), origin)));
        }
    }
}

/// Only `CERTIFICATE` blocks without headers are passed on
fn is_plain_certificate(block: &::pem::Pem) -> bool {
    block.tag() == "CERTIFICATE" && block.headers().iter().next().is_none()
}

/// Length of the block starting at `block[0]`, through the closing dashes of its END line
fn block_len(block: &[u8]) -> usize {
    let Some(end) = find(block, END_MARKER) else {
        return block.len();
    };
    let label_start = end + END_MARKER.len();
    match find(&block[label_start..], DASHES) {
        Some(close) => label_start + close + DASHES.len(),
        None => block.len(),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
