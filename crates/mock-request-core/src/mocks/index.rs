//! Fixture index shared by all lookups.

use crate::config::error::ConfigError;
use crate::config::index::{load_error_index, load_success_index};
use crate::matching::RequestSignature;
use crate::types::fixture::{ErrorFixtureRecord, SuccessFixtureRecord};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
struct IndexedFixture {
    signature: RequestSignature,
    record: SuccessFixtureRecord,
}

/// Ordered success and error records.
///
/// Built once and never mutated afterwards, so a shared reference can be
/// handed to any number of readers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureIndex {
    success: Vec<IndexedFixture>,
    errors: Vec<ErrorFixtureRecord>,
}

impl FixtureIndex {
    /// Build an index from records. Artifact paths are taken as given.
    pub fn new(success: Vec<SuccessFixtureRecord>, errors: Vec<ErrorFixtureRecord>) -> Self {
        let success = success
            .into_iter()
            .map(|record| IndexedFixture {
                signature: record.signature(),
                record,
            })
            .collect();
        Self { success, errors }
    }

    /// Load both index files.
    ///
    /// Relative artifact paths are resolved against the directory of the
    /// index file that lists them.
    pub fn load(success_path: &Path, error_path: &Path) -> Result<Self, ConfigError> {
        let success = load_success_index(success_path)?
            .into_iter()
            .map(|mut record| {
                record.artifact_path = resolve_artifact_path(success_path, &record.artifact_path);
                record
            })
            .collect();

        let errors = load_error_index(error_path)?
            .into_iter()
            .map(|mut record| {
                record.artifact_path = resolve_artifact_path(error_path, &record.artifact_path);
                record
            })
            .collect();

        Ok(Self::new(success, errors))
    }

    /// First success record whose signature equals `signature`.
    pub fn find_success(&self, signature: &RequestSignature) -> Option<&SuccessFixtureRecord> {
        self.success
            .iter()
            .find(|fixture| &fixture.signature == signature)
            .map(|fixture| &fixture.record)
    }

    /// First error record with `code`, in file order.
    pub fn find_error(&self, code: u16) -> Option<&ErrorFixtureRecord> {
        self.errors.iter().find(|record| record.error_code == code)
    }

    pub fn first_error(&self) -> Option<&ErrorFixtureRecord> {
        self.errors.first()
    }

    pub fn success_records(&self) -> impl Iterator<Item = &SuccessFixtureRecord> {
        self.success.iter().map(|fixture| &fixture.record)
    }

    pub fn error_records(&self) -> &[ErrorFixtureRecord] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.success.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn resolve_artifact_path(index_path: &Path, artifact_path: &Path) -> PathBuf {
    if artifact_path.is_absolute() {
        return artifact_path.to_path_buf();
    }
    match index_path.parent() {
        Some(dir) => dir.join(artifact_path),
        None => artifact_path.to_path_buf(),
    }
}

/// Inverse of [`resolve_artifact_path`]: the path to write into an index file
/// so that loading it resolves back to `artifact_path`.
///
/// Artifacts under the index directory become relative to it; anything else
/// is written as an absolute path.
pub(crate) fn relative_artifact_path(index_path: &Path, artifact_path: &Path) -> PathBuf {
    let index_dir = index_path.parent().unwrap_or_else(|| Path::new(""));
    if let Ok(rest) = artifact_path.strip_prefix(index_dir) {
        return rest.to_path_buf();
    }
    if index_dir.is_absolute() == artifact_path.is_absolute() {
        return absolute(artifact_path);
    }

    let artifact_abs = absolute(artifact_path);
    match artifact_abs.strip_prefix(absolute(index_dir)) {
        Ok(rest) => rest.to_path_buf(),
        Err(_) => artifact_abs,
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
