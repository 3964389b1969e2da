//! Data models for x509tojson
//!
//! This module contains all the data structures passed between the source
//! reader, the decoder and the sinks.

pub mod blob;
pub mod certificate;
pub mod summary;

pub use blob::{BlobOrigin, ConversionError, RawBlob};
pub use certificate::{
    BasicConstraints, DistinguishedName, ExtensionSummary, Fingerprints, ParsedCertificate,
    PublicKeyInfo, SignatureAlgorithm, SubjectAltNames, Validity,
};
pub use summary::RunSummary;
