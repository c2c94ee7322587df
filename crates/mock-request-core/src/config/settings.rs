//! Settings file bundling index locations and capture options.

use crate::config::error::ConfigError;
use crate::config::parser::{parse_config, read_file};
use crate::mocks::matcher::ErrorFallback;
use crate::mocks::recorder::FixtureRecorder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Header carrying the API key when none is configured
pub const DEFAULT_CREDENTIAL_HEADER: &str = "Authorization";

fn default_credential_header() -> String {
    DEFAULT_CREDENTIAL_HEADER.to_string()
}

/// Matcher and recorder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockSettings {
    /// Success index (YAML or JSON)
    pub success_index: PathBuf,
    /// Error index (CSV)
    pub error_index: PathBuf,
    /// Header stripped from every captured response
    #[serde(default = "default_credential_header")]
    pub credential_header: String,
    /// Error record selection when a request has no error hint
    #[serde(default)]
    pub error_fallback: ErrorFallback,
}

impl MockSettings {
    pub fn new(success_index: impl Into<PathBuf>, error_index: impl Into<PathBuf>) -> Self {
        Self {
            success_index: success_index.into(),
            error_index: error_index.into(),
            credential_header: default_credential_header(),
            error_fallback: ErrorFallback::default(),
        }
    }

    pub fn recorder(&self) -> FixtureRecorder {
        FixtureRecorder::new(self.credential_header.clone())
    }
}

/// Load settings from a YAML or JSON file.
///
/// Relative index paths are resolved against the settings file's directory.
pub fn load_settings(path: &Path) -> Result<MockSettings, ConfigError> {
    let content = read_file(path)?;
    let mut settings: MockSettings = parse_config(&content, path)?;

    if let Some(dir) = path.parent() {
        for index in [&mut settings.success_index, &mut settings.error_index] {
            if index.is_relative() {
                *index = dir.join(&*index);
            }
        }
    }
    Ok(settings)
}
