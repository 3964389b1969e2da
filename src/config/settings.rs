//! Run settings
//!
//! Built once at startup from the command line and an optional TOML file,
//! then passed by reference into the pipeline.

use crate::cli::Cli;
use crate::source::InputFormat;
use crate::utils::ConfigError;
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_INDEX_URL: &str = "http://localhost:9200/ct/certificates/";
pub const DEFAULT_CSV_COLUMN: usize = 1;

/// CSV settings
#[derive(Debug, Clone, Deserialize)]
pub struct CsvSettings {
    #[serde(default = "default_column")]
    pub column: usize,
}

fn default_column() -> usize {
    DEFAULT_CSV_COLUMN
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            column: DEFAULT_CSV_COLUMN,
        }
    }
}

/// Search index settings
#[derive(Debug, Clone, Deserialize)]
pub struct IndexSettings {
    #[serde(default = "default_index_url")]
    pub url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_index_url() -> String {
    DEFAULT_INDEX_URL.to_string()
}

fn default_user_agent() -> String {
    format!("x509tojson/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            url: default_index_url(),
            user_agent: default_user_agent(),
        }
    }
}

/// Contents of a settings file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub csv: CsvSettings,
    #[serde(default)]
    pub index: IndexSettings,
}

impl FileSettings {
    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }
}

/// A validated index endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTarget {
    pub url: Url,
    pub user_agent: String,
}

/// Where decoded certificates go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Index(IndexTarget),
}

/// Everything one run needs to know
#[derive(Debug, Clone)]
pub struct Settings {
    pub files: Vec<PathBuf>,
    pub input: InputFormat,
    pub output: OutputTarget,
}

impl Settings {
    /// Resolve settings: CLI flag, then settings file, then built-in default
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileSettings::load_from_file(path)?,
            None => FileSettings::default(),
        };
        Self::resolve(cli, file)
    }

    pub fn resolve(cli: &Cli, file: FileSettings) -> Result<Self, ConfigError> {
        if cli.files.is_empty() {
            return Err(ConfigError::NoInputFiles);
        }

        let input = if cli.csv {
            InputFormat::Csv {
                column: cli.column.unwrap_or(file.csv.column),
            }
        } else {
            InputFormat::Pem
        };

        let output = if cli.es {
            let raw = cli.esurl.clone().unwrap_or(file.index.url);
            let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
                key: "index.url".to_string(),
                message: format!("{}: {}", raw, e),
            })?;
            OutputTarget::Index(IndexTarget {
                url,
                user_agent: file.index.user_agent,
            })
        } else {
            OutputTarget::Stdout
        };

        Ok(Self {
            files: cli.files.clone(),
            input,
            output,
        })
    }
}
