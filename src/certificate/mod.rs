//! Certificate decoding
//!
//! The only place x509-parser is touched. Everything downstream works with
//! the owned [`crate::models::ParsedCertificate`].

pub mod decoder;
pub mod oids;

pub use decoder::CertificateDecoder;
