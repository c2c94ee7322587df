//! Outgoing request descriptions and their captured form.

use crate::matching::RequestSignature;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// GET request as the client would send it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDescription {
    /// Target URL, optionally with an embedded query string
    pub url: String,
    /// Request headers (not used for matching)
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: BTreeMap<String, Value>,
    /// Error code the caller expects when no success fixture applies
    pub error_hint: Option<u16>,
}

impl RequestDescription {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn expect_error(mut self, code: u16) -> Self {
        self.error_hint = Some(code);
        self
    }

    pub fn signature(&self) -> RequestSignature {
        RequestSignature::new(&self.url, &self.params)
    }
}

/// Request metadata stored alongside a captured response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapturedRequest {
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl CapturedRequest {
    pub fn signature(&self) -> RequestSignature {
        RequestSignature::new(&self.url, &self.params)
    }
}

impl From<&RequestDescription> for CapturedRequest {
    fn from(request: &RequestDescription) -> Self {
        Self {
            url: request.url.clone(),
            params: request.params.clone(),
            headers: request
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}
