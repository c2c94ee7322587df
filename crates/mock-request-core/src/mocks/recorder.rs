//! Capturing live responses into artifacts and index records.

use crate::artifact::{save_artifact, ArtifactError};
use crate::config::error::ConfigError;
use crate::config::index::{write_error_index, write_success_index};
use crate::mocks::index::relative_artifact_path;
use crate::types::fixture::{ErrorFixtureRecord, SuccessFixtureRecord};
use crate::types::response::StoredResponse;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Outcome of stripping the credential header from a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redaction {
    /// Header was present and has been removed
    Removed,
    /// Header was not in the captured request; a warning was logged
    Absent,
}

/// Errors that can occur while recording fixtures
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error("failed to write fixture index: {0}")]
    Index(#[from] ConfigError),
}

/// Records responses as fixtures, never persisting the credential header.
///
/// Records accumulate in memory in capture order; `write_success_index` and
/// `write_error_index` persist them in the formats [`FixtureMatcher`] loads,
/// rewriting artifact paths relative to the index file so a matcher built
/// from it finds the same files.
///
/// [`FixtureMatcher`]: crate::mocks::matcher::FixtureMatcher
#[derive(Debug, Clone)]
pub struct FixtureRecorder {
    credential_header: String,
    success: Vec<SuccessFixtureRecord>,
    errors: Vec<ErrorFixtureRecord>,
}

impl FixtureRecorder {
    pub fn new(credential_header: impl Into<String>) -> Self {
        Self {
            credential_header: credential_header.into(),
            success: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn credential_header(&self) -> &str {
        &self.credential_header
    }

    /// Strip the credential header from the captured request and response.
    ///
    /// The outcome reflects the captured request: a credential echoed only in
    /// the response headers is still removed, but reported as `Absent`.
    pub fn redact(&self, response: &mut StoredResponse) -> Redaction {
        let stripped = response.strip_header(&self.credential_header);
        if stripped.from_request {
            return Redaction::Removed;
        }
        warn!(
            header = %self.credential_header,
            url = %response.request.url,
            removed_from_response = stripped.from_response,
            "credential header not present in captured request headers"
        );
        Redaction::Absent
    }

    /// Persist a successful response and index it by its request signature.
    pub fn record_success(
        &mut self,
        mut response: StoredResponse,
        path: impl AsRef<Path>,
    ) -> Result<Redaction, RecordError> {
        let path = path.as_ref();
        let redaction = self.redact(&mut response);
        save_artifact(path, &response)?;

        debug!(
            url = %response.request.url,
            artifact = %path.display(),
            "recorded success fixture"
        );
        self.success.push(SuccessFixtureRecord {
            url: response.request.url,
            params: response.request.params,
            artifact_path: path.to_path_buf(),
        });
        Ok(redaction)
    }

    /// Persist an error response and index it by its status code.
    pub fn record_error(
        &mut self,
        mut response: StoredResponse,
        path: impl AsRef<Path>,
    ) -> Result<Redaction, RecordError> {
        let path = path.as_ref();
        let redaction = self.redact(&mut response);
        save_artifact(path, &response)?;

        debug!(
            status = response.status,
            artifact = %path.display(),
            "recorded error fixture"
        );
        self.errors.push(ErrorFixtureRecord {
            error_code: response.status,
            artifact_path: path.to_path_buf(),
        });
        Ok(redaction)
    }

    pub fn success_records(&self) -> &[SuccessFixtureRecord] {
        &self.success
    }

    pub fn error_records(&self) -> &[ErrorFixtureRecord] {
        &self.errors
    }

    pub fn write_success_index(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        let path = path.as_ref();
        let records: Vec<SuccessFixtureRecord> = self
            .success
            .iter()
            .map(|record| SuccessFixtureRecord {
                artifact_path: relative_artifact_path(path, &record.artifact_path),
                ..record.clone()
            })
            .collect();
        Ok(write_success_index(path, &records)?)
    }

    pub fn write_error_index(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        let path = path.as_ref();
        let records: Vec<ErrorFixtureRecord> = self
            .errors
            .iter()
            .map(|record| ErrorFixtureRecord {
                error_code: record.error_code,
                artifact_path: relative_artifact_path(path, &record.artifact_path),
            })
            .collect();
        Ok(write_error_index(path, &records)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::load_artifact;
    use crate::mocks::matcher::FixtureMatcher;
    use crate::types::http::HttpResponse;
    use crate::types::request::{CapturedRequest, RequestDescription};
    use rstest::rstest;
    use serde_json::json;
    use std::fs;

    const SEARCH_URL: &str = "https://api.yelp.com/v3/businesses/search";
    const API_KEY: &str = "Bearer sk-live-123";

    fn live_request() -> RequestDescription {
        RequestDescription::get(SEARCH_URL)
            .param("location", "Newark, NJ")
            .param("term", "laundromat")
            .param("limit", 5)
            .header("Authorization", API_KEY)
            .header("Accept", "application/json")
    }

    fn live_response(request: &RequestDescription, status: u16, body: &str) -> StoredResponse {
        StoredResponse::new(CapturedRequest::from(request), status)
            .with_header("Content-Type", "application/json")
            .with_body(body)
    }

    #[rstest]
    #[case("Authorization")]
    #[case("authorization")]
    fn test_record_success_strips_credential(#[case] header: &str) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ok.json");
        let mut recorder = FixtureRecorder::new(header);

        let redaction = recorder
            .record_success(live_response(&live_request(), 200, "{}"), &path)
            .expect("record");

        assert_eq!(redaction, Redaction::Removed);
        let raw = fs::read_to_string(&path).expect("read artifact");
        assert!(!raw.contains(API_KEY));
        assert!(!raw.to_lowercase().contains("authorization"));

        let stored = load_artifact(&path).expect("load");
        assert_eq!(
            stored.request.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[rstest]
    fn test_record_error_strips_credential_echoed_in_response() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("400.json");
        let mut recorder = FixtureRecorder::new("Authorization");
        let response = live_response(&live_request(), 400, r#"{"error": "bad"}"#)
            .with_header("authorization", API_KEY);

        let redaction = recorder.record_error(response, &path).expect("record");

        assert_eq!(redaction, Redaction::Removed);
        assert!(!fs::read_to_string(&path).expect("read").contains(API_KEY));
        assert_eq!(recorder.error_records()[0].error_code, 400);
        assert_eq!(recorder.error_records()[0].artifact_path, path);
    }

    #[rstest]
    fn test_record_without_credential_still_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ok.json");
        let mut recorder = FixtureRecorder::new("X-Api-Key");
        let request = RequestDescription::get(SEARCH_URL).param("term", "pizza");

        let redaction = recorder
            .record_success(live_response(&request, 200, "{}"), &path)
            .expect("record");

        assert_eq!(redaction, Redaction::Absent);
        assert!(path.exists());
        assert_eq!(recorder.success_records().len(), 1);
    }

    #[rstest]
    fn test_credential_only_in_response_is_stripped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ok.json");
        let mut recorder = FixtureRecorder::new("X-Api-Key");
        let request = RequestDescription::get(SEARCH_URL).param("term", "pizza");
        let response = live_response(&request, 200, "{}").with_header("x-api-key", "secret-key");

        let redaction = recorder.record_success(response, &path).expect("record");

        assert_eq!(redaction, Redaction::Absent);
        assert!(!fs::read_to_string(&path).expect("read").contains("secret-key"));
    }

    #[rstest]
    fn test_record_into_unwritable_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").expect("write");
        let mut recorder = FixtureRecorder::new("Authorization");

        let result = recorder.record_success(
            live_response(&live_request(), 200, "{}"),
            blocker.join("ok.json"),
        );

        assert!(matches!(
            result,
            Err(RecordError::Artifact(ArtifactError::Io { .. }))
        ));
        assert!(recorder.success_records().is_empty());
    }

    #[rstest]
    #[case("success.yaml")]
    #[case("success.json")]
    fn test_record_then_replay(#[case] success_name: &str) {
        let dir = tempfile::tempdir().expect("tempdir");
        let body = r#"{"businesses":[{"name":"Suds & Duds","rating":4.5}],"total":1}"#;
        let mut recorder = FixtureRecorder::new("Authorization");

        recorder
            .record_success(
                live_response(&live_request(), 200, body),
                dir.path().join("laundromats.json"),
            )
            .expect("record success");
        let bad = RequestDescription::get(SEARCH_URL).header("Authorization", API_KEY);
        recorder
            .record_error(
                live_response(&bad, 400, r#"{"error":"VALIDATION_ERROR"}"#),
                dir.path().join("400.json"),
            )
            .expect("record error");

        let success_index = dir.path().join(success_name);
        let error_index = dir.path().join("errors.csv");
        recorder
            .write_success_index(&success_index)
            .expect("write success index");
        recorder
            .write_error_index(&error_index)
            .expect("write error index");

        let matcher = FixtureMatcher::new(&success_index, &error_index).expect("load matcher");

        let replayed = matcher.resolve(&live_request()).expect("replay success");
        assert_eq!(replayed.text(), body);
        assert_eq!(replayed.status(), 200);
        assert!(replayed.request.headers.keys().all(|k| k != "Authorization"));

        let replayed = matcher
            .resolve(&RequestDescription::get(SEARCH_URL).expect_error(400))
            .expect("replay error");
        assert_eq!(replayed.json().expect("json"), json!({"error": "VALIDATION_ERROR"}));
    }

    #[rstest]
    fn test_index_stores_paths_relative_to_index_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fixtures = dir.path().join("fixtures");
        let mut recorder = FixtureRecorder::new("Authorization");
        recorder
            .record_success(
                live_response(&live_request(), 200, "{}"),
                fixtures.join("ok.json"),
            )
            .expect("record success");
        recorder
            .record_error(
                live_response(&live_request(), 404, "{}"),
                dir.path().join("shared/404.json"),
            )
            .expect("record error");

        let success_index = fixtures.join("success.yaml");
        let error_index = fixtures.join("errors.csv");
        recorder.write_success_index(&success_index).expect("write");
        recorder.write_error_index(&error_index).expect("write");

        let yaml = fs::read_to_string(&success_index).expect("read");
        assert!(yaml.contains("pickle_path: ok.json"));
        let csv = fs::read_to_string(&error_index).expect("read");
        assert!(csv.contains(&dir.path().join("shared/404.json").display().to_string()));
        assert_eq!(recorder.success_records()[0].artifact_path, fixtures.join("ok.json"));
    }

    #[rstest]
    fn test_record_then_replay_with_relative_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let previous = std::env::current_dir().expect("cwd");
        std::env::set_current_dir(dir.path()).expect("enter tempdir");

        let body = r#"{"total":0}"#;
        let mut recorder = FixtureRecorder::new("Authorization");
        let recorded = recorder
            .record_success(live_response(&live_request(), 200, body), "fixtures/ok.json")
            .and_then(|_| recorder.write_success_index("fixtures/success.yaml"))
            .and_then(|_| recorder.write_error_index("fixtures/errors.csv"));
        let replayed = recorded.map_err(|e| e.to_string()).and_then(|_| {
            FixtureMatcher::new("fixtures/success.yaml", "fixtures/errors.csv")
                .map_err(|e| e.to_string())?
                .resolve(&live_request())
                .map_err(|e| e.to_string())
        });

        std::env::set_current_dir(previous).expect("restore cwd");
        assert_eq!(replayed.expect("replay").text(), body);
    }

    #[rstest]
    fn test_write_index_reports_unknown_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let recorder = FixtureRecorder::new("Authorization");
        let result = recorder.write_success_index(dir.path().join("success.txt"));
        assert!(matches!(
            result,
            Err(RecordError::Index(ConfigError::UnknownFileType(_)))
        ));
    }
}
