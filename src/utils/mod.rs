//! Utility modules for x509tojson
//!
//! This module contains the error types shared across the pipeline.

pub mod error;

pub use error::{
    CertificateError, ConfigError, ConvertError, Result, SinkError, SourceError,
};
