//! Response and client interfaces shared by live and replayed traffic.

use crate::types::request::RequestDescription;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Read access to an HTTP response.
pub trait HttpResponse {
    fn status(&self) -> u16;

    fn headers(&self) -> &BTreeMap<String, String>;

    /// Raw body bytes
    fn body(&self) -> &[u8];

    /// Body decoded as UTF-8, replacing invalid sequences.
    fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.body())
    }

    /// Case-insensitive header lookup.
    fn header(&self, name: &str) -> Option<&str> {
        self.headers()
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body parsed as JSON.
    fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(self.body())
    }

    fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }
}

/// Something that can answer a GET request.
///
/// [`FixtureMatcher`](crate::mocks::matcher::FixtureMatcher) implements this
/// by replaying stored fixtures; a live client implements it by going to the
/// network. Code written against the trait runs unchanged on either.
pub trait HttpClient {
    type Response: HttpResponse;
    type Error: std::error::Error;

    fn send(&self, request: &RequestDescription) -> Result<Self::Response, Self::Error>;
}
