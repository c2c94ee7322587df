//! Stored response snapshots.

use crate::types::http::HttpResponse;
use crate::types::request::CapturedRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Snapshot of an HTTP response as persisted in an artifact file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Response body. Text bodies are stored as a string, anything else
    /// as `{"base64": ...}`.
    #[serde(default, with = "body_encoding")]
    pub body: Vec<u8>,
    /// Request that produced this response
    pub request: CapturedRequest,
}

impl StoredResponse {
    pub fn new(request: CapturedRequest, status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: Vec::new(),
            request,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a JSON body and the matching content type.
    pub fn with_json(self, body: &Value) -> Self {
        self.with_header("Content-Type", "application/json")
            .with_body(body.to_string())
    }

    /// Remove a header from both the captured request and the response,
    /// ignoring case.
    pub(crate) fn strip_header(&mut self, name: &str) -> StrippedHeader {
        let before = (self.request.headers.len(), self.headers.len());
        self.request
            .headers
            .retain(|k, _| !k.eq_ignore_ascii_case(name));
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
        StrippedHeader {
            from_request: self.request.headers.len() != before.0,
            from_response: self.headers.len() != before.1,
        }
    }
}

/// Where [`StoredResponse::strip_header`] found the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct StrippedHeader {
    pub from_request: bool,
    pub from_response: bool,
}

impl HttpResponse for StoredResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    fn body(&self) -> &[u8] {
        &self.body
    }
}

mod body_encoding {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Binary { base64: String },
    }

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match std::str::from_utf8(bytes) {
            Ok(text) => serializer.serialize_str(text),
            Err(_) => Repr::Binary {
                base64: STANDARD.encode(bytes),
            }
            .serialize(serializer),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => Ok(text.into_bytes()),
            Repr::Binary { base64 } => STANDARD
                .decode(base64)
                .map_err(serde::de::Error::custom),
        }
    }
}
