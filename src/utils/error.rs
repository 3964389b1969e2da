//! Custom error types for x509tojson
//!
//! [`ConvertError`] and everything folded into it is fatal and ends the run.
//! [`CertificateError`] is the exception: it describes one undecodable blob,
//! which the consumer logs (as a [`crate::models::ConversionError`]) and
//! skips.

use thiserror::Error;

/// Top-level error type for a conversion run
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pipeline task failed: {message}")]
    Task { message: String },
}

/// Errors raised while reading input files
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {message}")]
    FileReadError { path: String, message: String },

    #[error("Malformed line in {path}:{line} (need a field at column {column}), got {fields:?}")]
    MalformedLine {
        path: String,
        line: usize,
        column: usize,
        fields: Vec<String>,
    },

    #[error("Malformed base64 in {path}:{line}: {message}")]
    MalformedBase64 {
        path: String,
        line: usize,
        message: String,
    },
}

/// Errors raised while emitting certificates
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to serialize certificate to JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),
}

/// Certificate decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    #[error("failed to parse certificate: {message}")]
    ParseError { message: String },

    #[error("invalid {field} timestamp in certificate")]
    InvalidTime { field: &'static str },

    #[error("{len} bytes of trailing data after certificate")]
    TrailingData { len: usize },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("No files specified")]
    NoInputFiles,

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias using ConvertError
pub type Result<T> = std::result::Result<T, ConvertError>;
