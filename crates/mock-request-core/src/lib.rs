//! Record real HTTP responses as fixtures and replay them in tests.
//!
//! Capture side: [`FixtureRecorder`] strips the credential header, writes
//! one artifact per response and builds the success and error indexes.
//! Replay side: [`FixtureMatcher`] loads the indexes once and resolves each
//! outgoing request to the stored response it was captured from.

pub mod artifact;
pub mod config;
pub mod matching;
pub mod mocks;
pub mod types;

pub use artifact::ArtifactError;
pub use config::error::ConfigError;
pub use config::settings::{load_settings, MockSettings};
pub use matching::RequestSignature;
pub use mocks::index::FixtureIndex;
pub use mocks::matcher::{ErrorFallback, FixtureMatcher, ResolveError};
pub use mocks::recorder::{FixtureRecorder, RecordError, Redaction};
pub use types::fixture::{ErrorFixtureRecord, SuccessFixtureRecord};
pub use types::http::{HttpClient, HttpResponse};
pub use types::request::{CapturedRequest, RequestDescription};
pub use types::response::StoredResponse;
