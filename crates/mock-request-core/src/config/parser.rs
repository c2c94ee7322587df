//! File parsing by extension (YAML/JSON/CSV).

use crate::config::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Config file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Csv,
    Unknown,
}

/// Get config file type from path extension
pub fn get_file_type(path: &Path) -> ConfigFileType {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        "csv" => ConfigFileType::Csv,
        _ => ConfigFileType::Unknown,
    }
}

/// Read a whole file as UTF-8 text
pub fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a file, creating parent directories as needed
pub fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, content).map_err(io_err)
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse CSV content with a header row into one value per row
pub fn parse_csv<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, ConfigError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(ConfigError::from)
}

/// Parse structured content (YAML or JSON) based on file type
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Csv | ConfigFileType::Unknown => {
            Err(ConfigError::UnknownFileType(path.display().to_string()))
        }
    }
}

/// Render structured content (YAML or JSON) based on file type
pub fn render_config<T: Serialize>(value: &T, path: &Path) -> Result<String, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => serde_yaml::to_string(value).map_err(ConfigError::from),
        ConfigFileType::Json => serde_json::to_string_pretty(value).map_err(ConfigError::from),
        ConfigFileType::Csv | ConfigFileType::Unknown => {
            Err(ConfigError::UnknownFileType(path.display().to_string()))
        }
    }
}
