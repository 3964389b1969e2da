//! Raw certificate blobs and per-record conversion failures

use base64::Engine;
use std::fmt;

/// Where a blob came from within the input files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobOrigin {
    /// N-th emitted CERTIFICATE block of a PEM file (0-based)
    Pem { path: String, block: usize },
    /// 1-based line of a CSV file
    Csv { path: String, line: usize },
}

impl fmt::Display for BlobOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobOrigin::Pem { path, block } => write!(f, "{}[{}]", path, block),
            BlobOrigin::Csv { path, line } => write!(f, "{}:{}", path, line),
        }
    }
}

/// DER bytes of one certificate, not yet decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlob {
    pub der: Vec<u8>,
    pub origin: BlobOrigin,
}

impl RawBlob {
    pub fn new(der: Vec<u8>, origin: BlobOrigin) -> Self {
        Self { der, origin }
    }

    /// Standard base64 of the DER bytes
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.der)
    }
}

/// A blob that could not be decoded as a certificate.
///
/// Not fatal to the run: the consumer logs it and moves on.
#[derive(Debug, Clone)]
pub struct ConversionError {
    pub origin: BlobOrigin,
    pub message: String,
    /// Base64 of the offending bytes, for diagnosis
    pub encoded: String,
}

impl ConversionError {
    pub fn new(blob: &RawBlob, message: impl Into<String>) -> Self {
        Self {
            origin: blob.origin.clone(),
            message: message.into(),
            encoded: blob.to_base64(),
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error in cert {} ({}): {}",
            self.message, self.origin, self.encoded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_carries_base64() {
        let blob = RawBlob::new(
            vec![0xde, 0xad, 0xbe, 0xef],
            BlobOrigin::Csv {
                path: "certs.csv".to_string(),
                line: 4,
            },
        );
        let err = ConversionError::new(&blob, "unexpected tag");
        assert_eq!(err.encoded, "3q2+7w==");
        assert_eq!(
            err.to_string(),
            "Error in cert unexpected tag (certs.csv:4): 3q2+7w=="
        );
    }

    #[test]
    fn test_pem_origin_display() {
        let origin = BlobOrigin::Pem {
            path: "bundle.pem".to_string(),
            block: 2,
        };
        assert_eq!(origin.to_string(), "bundle.pem[2]");
    }
}
