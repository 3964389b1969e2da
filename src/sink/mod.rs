//! Certificate sinks
//!
//! A sink takes decoded certificates one at a time and publishes them:
//! - [`StdoutSink`] writes newline-delimited JSON
//! - [`IndexSink`] POSTs each document to a search index

pub mod index;
pub mod stdout;

pub use index::IndexSink;
pub use stdout::StdoutSink;

use crate::models::ParsedCertificate;
use crate::utils::SinkError;
use std::future::Future;

/// Outcome of emitting one certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Written to the output stream
    Written,
    /// The index answered with a success or redirect status
    Accepted { status: u16 },
    /// The index answered with a status above 299; already logged
    Rejected { status: u16, body: String },
}

/// Destination for decoded certificates.
///
/// An `Err` from either method is fatal to the run.
pub trait CertificateSink: Send {
    fn emit(
        &mut self,
        cert: &ParsedCertificate,
    ) -> impl Future<Output = Result<Delivery, SinkError>> + Send;

    /// Called once after the last certificate
    fn finish(&mut self) -> impl Future<Output = Result<(), SinkError>> + Send {
        async { Ok(()) }
    }
}
