//! Per-run counters

use serde::Serialize;

/// What one pass through the pipeline did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Input files opened
    pub files: usize,
    /// Blobs handed to the consumer
    pub blobs: usize,
    /// Certificates written to stdout or accepted by the index
    pub emitted: usize,
    /// Blobs that failed to decode
    pub decode_failures: usize,
    /// Index responses with a status above 299
    pub rejected: usize,
}

impl RunSummary {
    /// Fold the consumer's counters into the producer's
    pub fn merge(self, other: RunSummary) -> RunSummary {
        RunSummary {
            files: self.files + other.files,
            blobs: self.blobs + other.blobs,
            emitted: self.emitted + other.emitted,
            decode_failures: self.decode_failures + other.decode_failures,
            rejected: self.rejected + other.rejected,
        }
    }
}
