//! Configuration module for x509tojson
//!
//! Handles building the run settings from the command line and an optional
//! TOML file.

pub mod settings;

pub use settings::{
    CsvSettings, FileSettings, IndexSettings, IndexTarget, OutputTarget, Settings,
    DEFAULT_CSV_COLUMN, DEFAULT_INDEX_URL,
};
