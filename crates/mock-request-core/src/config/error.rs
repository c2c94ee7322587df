//! Error types for index and settings files.

use std::fmt;
use std::path::PathBuf;

/// Index or settings file error
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read or written
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// JSON parsing or encoding error
    Json(serde_json::Error),
    /// YAML parsing or encoding error
    Yaml(serde_yaml::Error),
    /// CSV parsing or encoding error
    Csv(csv::Error),
    /// Unknown file type
    UnknownFileType(String),
    /// File parsed but does not have the expected shape
    InvalidIndex { path: PathBuf, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            ConfigError::Json(e) => write!(f, "JSON parsing error: {}", e),
            ConfigError::Yaml(e) => write!(f, "YAML parsing error: {}", e),
            ConfigError::Csv(e) => write!(f, "CSV parsing error: {}", e),
            ConfigError::UnknownFileType(path) => write!(f, "Unknown file type: {}", path),
            ConfigError::InvalidIndex { path, reason } => {
                write!(f, "Invalid index {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
            ConfigError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

impl From<csv::Error> for ConfigError {
    fn from(err: csv::Error) -> Self {
        ConfigError::Csv(err)
    }
}
