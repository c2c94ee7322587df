//! Matcher that answers requests from stored fixtures instead of the network.

use crate::artifact::{load_artifact, ArtifactError};
use crate::config::error::ConfigError;
use crate::config::settings::MockSettings;
use crate::mocks::index::FixtureIndex;
use crate::types::http::HttpClient;
use crate::types::request::RequestDescription;
use crate::types::response::StoredResponse;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Error record selection when no success fixture matches and the request
/// carries no error hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFallback {
    /// Fail with [`ResolveError::FixtureNotFound`]
    #[default]
    Fail,
    /// Use the first error record in file order
    FirstRecord,
}

/// Errors that can occur while resolving a request
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no fixture matches {signature}{}", describe_hint(.error_hint))]
    FixtureNotFound {
        signature: String,
        error_hint: Option<u16>,
    },
    #[error(transparent)]
    ArtifactLoad(#[from] ArtifactError),
}

fn describe_hint(error_hint: &Option<u16>) -> String {
    match error_hint {
        Some(code) => format!(" (expected error {code})"),
        None => String::new(),
    }
}

/// Resolves outgoing requests to stored responses.
///
/// Lookup order:
/// 1. first success record whose signature equals the request's
/// 2. first error record whose code equals the request's error hint
/// 3. the [`ErrorFallback`] policy when there is no hint
#[derive(Debug, Clone)]
pub struct FixtureMatcher {
    index: FixtureIndex,
    error_fallback: ErrorFallback,
}

impl FixtureMatcher {
    /// Load a matcher from a success index (YAML/JSON) and an error index (CSV).
    pub fn new(
        success_index: impl AsRef<Path>,
        error_index: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let index = FixtureIndex::load(success_index.as_ref(), error_index.as_ref())?;
        Ok(Self::from_index(index))
    }

    pub fn from_index(index: FixtureIndex) -> Self {
        Self {
            index,
            error_fallback: ErrorFallback::default(),
        }
    }

    pub fn from_settings(settings: &MockSettings) -> Result<Self, ConfigError> {
        Ok(Self::new(&settings.success_index, &settings.error_index)?
            .with_error_fallback(settings.error_fallback))
    }

    pub fn with_error_fallback(mut self, error_fallback: ErrorFallback) -> Self {
        self.error_fallback = error_fallback;
        self
    }

    pub fn index(&self) -> &FixtureIndex {
        &self.index
    }

    pub fn error_fallback(&self) -> ErrorFallback {
        self.error_fallback
    }

    /// Artifact path the request resolves to, without reading it.
    pub fn find_artifact_path(&self, request: &RequestDescription) -> Result<&Path, ResolveError> {
        let signature = request.signature();

        if let Some(record) = self.index.find_success(&signature) {
            debug!(%signature, artifact = %record.artifact_path.display(), "matched success fixture");
            return Ok(&record.artifact_path);
        }

        let error_record = match (request.error_hint, self.error_fallback) {
            (Some(code), _) => self.index.find_error(code),
            (None, ErrorFallback::FirstRecord) => self.index.first_error(),
            (None, ErrorFallback::Fail) => None,
        };

        match error_record {
            Some(record) => {
                debug!(
                    %signature,
                    error_code = record.error_code,
                    artifact = %record.artifact_path.display(),
                    "matched error fixture"
                );
                Ok(&record.artifact_path)
            }
            None => Err(ResolveError::FixtureNotFound {
                signature: signature.to_string(),
                error_hint: request.error_hint,
            }),
        }
    }

    /// Resolve a request to its stored response.
    pub fn resolve(&self, request: &RequestDescription) -> Result<StoredResponse, ResolveError> {
        let path = self.find_artifact_path(request)?;
        load_artifact(path).map_err(ResolveError::from)
    }
}

impl HttpClient for FixtureMatcher {
    type Response = StoredResponse;
    type Error = ResolveError;

    fn send(&self, request: &RequestDescription) -> Result<StoredResponse, ResolveError> {
        self.resolve(request)
    }
}
