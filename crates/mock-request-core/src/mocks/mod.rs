//! Fixture replay and capture.
//!
//! - [`FixtureIndex`](index::FixtureIndex): read-only success and error records
//! - [`FixtureMatcher`](matcher::FixtureMatcher): resolves requests to stored responses
//! - [`FixtureRecorder`](recorder::FixtureRecorder): captures responses into artifacts and indexes

pub mod index;
pub mod matcher;
pub mod recorder;
