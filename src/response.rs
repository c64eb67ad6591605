//! The normalized response returned by every dispatch, and the response-init
//! descriptor handlers use to shape it.

use http::header::{HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Canonical reason phrase for a status code, or `""` when there is none.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

/// Uniform response shape seen by test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    pub status_text: String,
    /// Multi-valued, unordered header collection
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl Response {
    /// Empty response with the canonical reason phrase.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            status_text: status_reason(status).to_string(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// JSON response with `Content-Type: application/json`.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        let mut resp = Self::new(status).with_body(body.to_string());
        resp.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        resp
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    /// Get a header by name (case-insensitive). Returns the first value.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as UTF-8 text, if present and valid.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Deserialize the body as JSON. A missing body deserializes from `null`.
    pub fn json_body<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        match self.body.as_deref() {
            Some(bytes) => serde_json::from_slice(bytes),
            None => serde_json::from_value(Value::Null),
        }
    }
}

/// Headers of a [`ResponseInit`], accepted either as an object or as a list
/// of `[name, value]` pairs (the latter allows repeated names). `null` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawInitHeaders")]
pub struct InitHeaders(pub Vec<(String, String)>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInitHeaders {
    Null,
    Map(BTreeMap<String, String>),
    Pairs(Vec<(String, String)>),
}

impl From<RawInitHeaders> for InitHeaders {
    fn from(raw: RawInitHeaders) -> Self {
        match raw {
            RawInitHeaders::Null => InitHeaders::default(),
            RawInitHeaders::Map(map) => InitHeaders(map.into_iter().collect()),
            RawInitHeaders::Pairs(pairs) => InitHeaders(pairs),
        }
    }
}

/// Status, status text and headers a handler wants on its response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseInit {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub headers: InitHeaders,
}

impl ResponseInit {
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.0.push((name.into(), value.into()));
        self
    }
}
